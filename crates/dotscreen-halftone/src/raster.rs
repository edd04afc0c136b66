//! Raster rotation and alpha paste
//!
//! The compositor needs two primitives the `image` crate does not provide:
//! rotation by an arbitrary angle into a bounding box that grows to hold the
//! whole rotated image, and pasting a buffer through its own alpha channel.
//! They sit behind [`RasterOps`] so another backend can be swapped in.

use image::{Rgba, RgbaImage};

/// Raster primitives used by the separation compositor
pub trait RasterOps {
    /// Rotate by `degrees`, enlarging the output so nothing is cropped.
    /// Area uncovered by the source is fully transparent.
    fn rotate(&self, image: &RgbaImage, degrees: f64) -> RgbaImage;

    /// Composite `src` onto `canvas` at `offset`, weighting colors by the
    /// source alpha; alpha itself composites source-over. Pixels falling
    /// outside the canvas are clipped.
    fn paste(&self, canvas: &mut RgbaImage, src: &RgbaImage, offset: (i64, i64));
}

/// Bilinear rotation with transparent fill
#[derive(Debug, Default, Clone, Copy)]
pub struct BilinearRaster;

/// Cosine and sine of an angle in degrees, exact on quarter turns
fn cos_sin_deg(degrees: f64) -> (f64, f64) {
    let turns = degrees.rem_euclid(360.0);
    if turns == 0.0 {
        (1.0, 0.0)
    } else if turns == 90.0 {
        (0.0, 1.0)
    } else if turns == 180.0 {
        (-1.0, 0.0)
    } else if turns == 270.0 {
        (0.0, -1.0)
    } else {
        let r = degrees.to_radians();
        (r.cos(), r.sin())
    }
}

/// Output `(width, height)` of a rotation: the rotated corner span, rounded
pub fn rotated_dimensions(width: u32, height: u32, degrees: f64) -> (u32, u32) {
    let (c, s) = cos_sin_deg(degrees);
    let (h, w) = (height as f64, width as f64);
    // Corners in (row, col) space, rotated by [[c, s], [-s, c]]
    let corners = [(0.0, 0.0), (0.0, w), (h, 0.0), (h, w)];
    let mut rows = (f64::INFINITY, f64::NEG_INFINITY);
    let mut cols = (f64::INFINITY, f64::NEG_INFINITY);
    for (r, col) in corners {
        let rr = c * r + s * col;
        let cc = -s * r + c * col;
        rows = (rows.0.min(rr), rows.1.max(rr));
        cols = (cols.0.min(cc), cols.1.max(cc));
    }
    (
        (cols.1 - cols.0 + 0.5).floor() as u32,
        (rows.1 - rows.0 + 0.5).floor() as u32,
    )
}

impl BilinearRaster {
    /// Sample `image` at fractional `(row, col)`; taps outside are transparent
    ///
    /// Colors are weighted by tap alpha, so a transparent fringe lowers the
    /// alpha of edge pixels without darkening them.
    fn sample(image: &RgbaImage, row: f64, col: f64) -> [f64; 4] {
        let r0 = row.floor();
        let c0 = col.floor();
        let fr = row - r0;
        let fc = col - c0;
        let (r0, c0) = (r0 as i64, c0 as i64);

        let mut color = [0.0; 3];
        let mut alpha = 0.0;
        let taps = [
            (r0, c0, (1.0 - fr) * (1.0 - fc)),
            (r0, c0 + 1, (1.0 - fr) * fc),
            (r0 + 1, c0, fr * (1.0 - fc)),
            (r0 + 1, c0 + 1, fr * fc),
        ];
        for (r, c, weight) in taps {
            if weight == 0.0
                || r < 0
                || c < 0
                || r >= image.height() as i64
                || c >= image.width() as i64
            {
                continue;
            }
            let px = image.get_pixel(c as u32, r as u32).0;
            let wa = weight * px[3] as f64;
            alpha += wa;
            for (acc, v) in color.iter_mut().zip(px) {
                *acc += wa * v as f64;
            }
        }

        if alpha == 0.0 {
            return [0.0; 4];
        }
        [color[0] / alpha, color[1] / alpha, color[2] / alpha, alpha]
    }
}

fn to_channel(value: f64) -> u8 {
    value.round().clamp(0.0, 255.0) as u8
}

impl RasterOps for BilinearRaster {
    fn rotate(&self, image: &RgbaImage, degrees: f64) -> RgbaImage {
        if image.width() == 0 || image.height() == 0 {
            return RgbaImage::new(0, 0);
        }

        let (c, s) = cos_sin_deg(degrees);
        let (out_w, out_h) = rotated_dimensions(image.width(), image.height(), degrees);

        // Map output (row, col) back into the input, keeping centers aligned
        let out_center = ((out_h as f64 - 1.0) / 2.0, (out_w as f64 - 1.0) / 2.0);
        let in_center = (
            (image.height() as f64 - 1.0) / 2.0,
            (image.width() as f64 - 1.0) / 2.0,
        );
        let offset = (
            in_center.0 - (c * out_center.0 + s * out_center.1),
            in_center.1 - (-s * out_center.0 + c * out_center.1),
        );

        RgbaImage::from_fn(out_w, out_h, |x, y| {
            let (or, oc) = (y as f64, x as f64);
            let row = c * or + s * oc + offset.0;
            let col = -s * or + c * oc + offset.1;
            let px = Self::sample(image, row, col);
            Rgba(px.map(to_channel))
        })
    }

    fn paste(&self, canvas: &mut RgbaImage, src: &RgbaImage, offset: (i64, i64)) {
        for (x, y, px) in src.enumerate_pixels() {
            let cx = x as i64 + offset.0;
            let cy = y as i64 + offset.1;
            if cx < 0 || cy < 0 || cx >= canvas.width() as i64 || cy >= canvas.height() as i64 {
                continue;
            }
            let alpha = px.0[3] as f64 / 255.0;
            if alpha == 0.0 {
                continue;
            }
            let dst = canvas.get_pixel_mut(cx as u32, cy as u32);
            for (d, s) in dst.0.iter_mut().take(3).zip(px.0) {
                *d = to_channel(*d as f64 * (1.0 - alpha) + s as f64 * alpha);
            }
            // Source over destination
            dst.0[3] = to_channel(px.0[3] as f64 + dst.0[3] as f64 * (1.0 - alpha));
        }
    }
}
