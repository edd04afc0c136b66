//! Dot placement
//!
//! Every canvas pixel `(x, y)` becomes one dot at the centered grid position
//! in the separation's rotated frame. Order is column-major: `x` outer,
//! `y` inner.

use crate::geometry::RunGeometry;
use crate::radius::dot_radius;
use dotscreen_vector::Dot;
use image::GrayImage;
use nalgebra::Point2;

/// Dots for one separation's intensity canvas
pub fn place_dots(intensities: &GrayImage, geometry: &RunGeometry, angle: f64) -> Vec<Dot> {
    let side = geometry.max_size;
    let mut dots = Vec::with_capacity(geometry.dots_per_separation());

    for x in 0..side {
        let pos_x = geometry.position(x);
        for y in 0..side {
            let value = intensities.get_pixel(x, y).0[0];
            let center = Point2::new(pos_x, geometry.position(y));
            dots.push(Dot::new(
                center,
                dot_radius(value, geometry.max_radius),
                angle,
            ));
        }
    }

    dots
}
