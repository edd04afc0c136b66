//! Run geometry
//!
//! The constants every separation shares: grid size, the square canvas side
//! that fits any rotation of the grid, the physical extent of the pattern and
//! the largest dot radius. They are computed once per run and passed to each
//! component explicitly so all separations print at the same scale.

use tracing::info;

/// Linear map of `value` from `[start1, stop1]` onto `[start2, stop2]`
pub fn map_range(value: f64, start1: f64, stop1: f64, start2: f64, stop2: f64) -> f64 {
    (value - start1) / (stop1 - start1) * (stop2 - start2) + start2
}

/// Side of the square that holds the `num_x × num_y` grid at any rotation
pub fn canvas_side(num_x: u32, num_y: u32) -> u32 {
    let (x, y) = (num_x as f64, num_y as f64);
    (x * x + y * y).sqrt().ceil() as u32
}

/// Shared per-run constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunGeometry {
    pub num_x: u32,
    pub num_y: u32,
    /// Canvas side, `ceil(sqrt(num_x² + num_y²))`
    pub max_size: u32,
    /// Width of the whole pattern in drawing units
    pub final_extent: f64,
    /// Radius of a fully dark dot, whole drawing units
    pub max_radius: f64,
}

impl RunGeometry {
    /// Derive the run constants
    ///
    /// * `page_width` - physical page width in drawing units
    /// * `scale` - fraction of the page width the grid itself spans
    /// * `max_radius_fraction` - largest dot diameter as a fraction of the cell pitch
    pub fn new(
        num_x: u32,
        num_y: u32,
        page_width: f64,
        scale: f64,
        max_radius_fraction: f64,
    ) -> Self {
        let max_size = canvas_side(num_x, num_y);
        let final_extent = (scale * page_width * max_size as f64 / num_x as f64).ceil();
        let max_radius =
            (max_radius_fraction * final_extent / (2.0 * max_size as f64)).round_ties_even();

        info!(
            "Grid {}x{}, canvas {}, final extent {:.0}, max radius {:.0}",
            num_x, num_y, max_size, final_extent, max_radius
        );

        Self {
            num_x,
            num_y,
            max_size,
            final_extent,
            max_radius,
        }
    }

    /// Centered position of grid index `index` along either axis
    pub fn position(&self, index: u32) -> f64 {
        let half = self.final_extent / 2.0;
        map_range(index as f64, 0.0, self.max_size as f64, -half, half)
    }

    /// Distance between neighbouring grid positions
    pub fn pitch(&self) -> f64 {
        self.final_extent / self.max_size as f64
    }

    /// Dots emitted per separation
    pub fn dots_per_separation(&self) -> usize {
        self.max_size as usize * self.max_size as usize
    }
}
