//! Separation compositor
//!
//! Rotates the sampled grid by a separation's screen angle, centers it on a
//! white square canvas of side `max_size` and reads one intensity per canvas
//! pixel. Canvas area not covered by the rotated grid stays white, so it
//! produces zero-radius dots.

use crate::channel::ChannelStrategy;
use crate::raster::RasterOps;
use crate::separation::Separation;
use image::{GrayImage, Luma, Rgba, RgbaImage};
use tracing::debug;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Offset that centers a span of `inner` on a span of `outer`, half to even
pub fn center_offset(outer: u32, inner: u32) -> i64 {
    ((outer as f64 - inner as f64) / 2.0).round_ties_even() as i64
}

/// Builds per-separation intensity canvases
pub struct Compositor<'a> {
    raster: &'a dyn RasterOps,
    strategy: ChannelStrategy,
    max_size: u32,
}

impl<'a> Compositor<'a> {
    pub fn new(raster: &'a dyn RasterOps, strategy: ChannelStrategy, max_size: u32) -> Self {
        Self {
            raster,
            strategy,
            max_size,
        }
    }

    /// Full RGBA canvas for `separation`
    pub fn canvas(&self, grid: &RgbaImage, separation: &Separation) -> RgbaImage {
        let rotated = self.raster.rotate(grid, separation.angle);
        let offset = (
            center_offset(self.max_size, rotated.width()),
            center_offset(self.max_size, rotated.height()),
        );
        debug!(
            "{}: grid rotated {}° to {}x{}, pasted at {:?}",
            separation.name,
            separation.angle,
            rotated.width(),
            rotated.height(),
            offset
        );

        let mut canvas = RgbaImage::from_pixel(self.max_size, self.max_size, WHITE);
        self.raster.paste(&mut canvas, &rotated, offset);
        canvas
    }

    /// Intensity of the separation's channel at every canvas pixel
    pub fn intensities(&self, grid: &RgbaImage, separation: &Separation) -> GrayImage {
        let canvas = self.canvas(grid, separation);
        GrayImage::from_fn(self.max_size, self.max_size, |x, y| {
            Luma([self
                .strategy
                .intensity(canvas.get_pixel(x, y), separation.channel)])
        })
    }
}
