//! Dot tessellation
//!
//! Turns dots into closed polylines by flattening lyon circle paths. The
//! circle is built in the dot's local frame and rotated onto the page, so the
//! start vertex turns with the separation angle like the rest of the screen.

use crate::document::Polyline;
use crate::drawing::Dot;
use lyon::math::{point, Angle, Transform};
use lyon::path::iterator::*;
use lyon::path::{Path, Winding};
use nalgebra::Point2;

/// Flatten a dot outline; zero-radius dots produce nothing
pub fn dot_outline(dot: &Dot, tolerance: f64) -> Option<Polyline> {
    circle_polyline(dot, dot.radius(), tolerance)
}

/// Concentric rings filling a dot, spaced by the pen width
///
/// The outermost ring sits one pen width inside the outline; the returned
/// list goes from the outside in.
pub fn dot_fill(dot: &Dot, pen_width: f64, tolerance: f64) -> Vec<Polyline> {
    if pen_width <= 0.0 {
        return Vec::new();
    }
    let mut rings = Vec::new();
    let mut r = dot.radius() - pen_width;
    while r > 0.0 {
        if let Some(ring) = circle_polyline(dot, r, tolerance) {
            rings.push(ring);
        }
        r -= pen_width;
    }
    rings
}

fn circle_polyline(dot: &Dot, radius: f64, tolerance: f64) -> Option<Polyline> {
    if radius <= 0.0 {
        return None;
    }

    let center = dot.center();
    let mut builder = Path::builder();
    builder.add_circle(
        point(center.x as f32, center.y as f32),
        radius as f32,
        Winding::Positive,
    );
    let path = builder.build();
    let path = if dot.rotation().abs() > 1e-9 {
        path.transformed(&Transform::rotation(Angle::degrees(dot.rotation() as f32)))
    } else {
        path
    };

    let mut points = Vec::new();
    for event in path.iter().flattened(tolerance as f32) {
        match event {
            lyon::path::Event::Begin { at } => {
                points.push(Point2::new(at.x as f64, at.y as f64));
            }
            lyon::path::Event::Line { to, .. } => {
                points.push(Point2::new(to.x as f64, to.y as f64));
            }
            _ => {}
        }
    }

    // Flattening ends on the start vertex again; closed polylines omit it.
    let returns_to_start = match (points.first(), points.last()) {
        (Some(first), Some(last)) => points.len() > 1 && nalgebra::distance(first, last) < 1e-4,
        _ => false,
    };
    if returns_to_start {
        points.pop();
    }
    if points.len() < 3 {
        return None;
    }
    Some(Polyline::closed(points))
}
