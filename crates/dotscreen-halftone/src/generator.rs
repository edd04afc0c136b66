//! Halftone generator
//!
//! Drives a full run: samples the source image once, derives the shared run
//! geometry, then composites and places every separation in table order.

use crate::channel::ChannelStrategy;
use crate::compositor::Compositor;
use crate::emitter::OutputEmitter;
use crate::error::{HalftoneError, HalftoneResult};
use crate::geometry::RunGeometry;
use crate::placement::place_dots;
use crate::raster::{BilinearRaster, RasterOps};
use crate::sampler::{sample, ResampleFilter};
use crate::separation::{Separation, SeparationTable};
use dotscreen_core::{Error, Orientation, PageGeometry, PageSize, StandardPages, PX_PER_MM};
use dotscreen_vector::{Document, Dot, Drawing, FinishingPipeline, VectorFinisher};
use image::{DynamicImage, RgbaImage};
use std::path::Path;
use tracing::info;

/// Parameters for a halftone run. Lengths are CSS pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct HalftoneParameters {
    /// Named page size or custom `WxH<unit>`
    pub page_size: String,
    pub orientation: Orientation,
    /// Center the finished geometry on the page
    pub center: bool,
    /// Grid columns, one dot per column
    pub num_x: u32,
    /// Fraction of the page width covered by the grid
    pub scale: f64,
    /// Add a fifth pass reading channel 3
    pub use_black_channel: bool,
    pub pen_width: f64,
    /// Largest dot diameter as a fraction of the cell pitch
    pub max_radius: f64,
    /// Fill dots with concentric pen strokes
    pub fill_layers: bool,
    pub channel_strategy: ChannelStrategy,
    pub filter: ResampleFilter,
    /// Circle flattening and simplification tolerance
    pub tolerance: f64,
    /// Endpoint distance for line merging
    pub merge_tolerance: f64,
    /// Run merge, simplify, reloop and sort after the color overrides
    pub finishing: bool,
}

impl Default for HalftoneParameters {
    fn default() -> Self {
        Self {
            page_size: "a4".to_string(),
            orientation: Orientation::Landscape,
            center: true,
            num_x: 100,
            scale: 0.8,
            use_black_channel: false,
            pen_width: 0.3 * PX_PER_MM,
            max_radius: 0.7,
            fill_layers: true,
            channel_strategy: ChannelStrategy::Proxy,
            filter: ResampleFilter::CatmullRom,
            tolerance: 0.05 * PX_PER_MM,
            merge_tolerance: 0.05 * PX_PER_MM,
            finishing: true,
        }
    }
}

impl HalftoneParameters {
    /// Reject values that would make the run meaningless
    pub fn validate(&self) -> HalftoneResult<()> {
        if self.num_x < 1 {
            return Err(HalftoneError::invalid_parameter(
                "num_x",
                "must be at least 1",
            ));
        }
        let positive = [
            ("scale", self.scale),
            ("pen_width", self.pen_width),
            ("tolerance", self.tolerance),
            ("merge_tolerance", self.merge_tolerance),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(HalftoneError::invalid_parameter(
                    name,
                    format!("must be a positive number, got {}", value),
                ));
            }
        }
        if !self.max_radius.is_finite() || self.max_radius < 0.0 {
            return Err(HalftoneError::invalid_parameter(
                "max_radius",
                format!("must not be negative, got {}", self.max_radius),
            ));
        }
        Ok(())
    }
}

/// Rotated-screen CMYK halftone generator
pub struct HalftoneGenerator {
    grid: RgbaImage,
    params: HalftoneParameters,
    page: PageSize,
    geometry: RunGeometry,
    separations: SeparationTable,
    raster: Box<dyn RasterOps>,
}

impl HalftoneGenerator {
    /// Load an image file and prepare a run
    pub fn from_file<P: AsRef<Path>>(path: P, params: HalftoneParameters) -> HalftoneResult<Self> {
        params.validate()?;
        let page = StandardPages.page_size(&params.page_size, params.orientation)?;

        let path = path.as_ref();
        let img = image::open(path)
            .map_err(|e| Error::image_load(path.display().to_string(), e.to_string()))?;
        info!(
            "Loaded {} ({}x{})",
            path.display(),
            img.width(),
            img.height()
        );
        Self::on_page(img, params, page)
    }

    /// Prepare a run from a decoded image using the built-in page table
    pub fn from_image(img: DynamicImage, params: HalftoneParameters) -> HalftoneResult<Self> {
        Self::with_page_geometry(img, params, &StandardPages)
    }

    /// Prepare a run resolving the page through `pages`
    pub fn with_page_geometry(
        img: DynamicImage,
        params: HalftoneParameters,
        pages: &dyn PageGeometry,
    ) -> HalftoneResult<Self> {
        params.validate()?;
        let page = pages.page_size(&params.page_size, params.orientation)?;
        Self::on_page(img, params, page)
    }

    fn on_page(
        img: DynamicImage,
        params: HalftoneParameters,
        page: PageSize,
    ) -> HalftoneResult<Self> {
        info!(
            "Page {} {}: {:.1}x{:.1}px",
            params.page_size, params.orientation, page.width, page.height
        );

        let grid = sample(&img, params.num_x, params.filter)?;
        let geometry = RunGeometry::new(
            grid.width(),
            grid.height(),
            page.width,
            params.scale,
            params.max_radius,
        );
        let separations = SeparationTable::new(params.use_black_channel);

        Ok(Self {
            grid,
            params,
            page,
            geometry,
            separations,
            raster: Box::new(BilinearRaster),
        })
    }

    /// Swap the raster backend used for rotation and paste
    pub fn with_raster(mut self, raster: Box<dyn RasterOps>) -> Self {
        self.raster = raster;
        self
    }

    pub fn params(&self) -> &HalftoneParameters {
        &self.params
    }

    pub fn geometry(&self) -> &RunGeometry {
        &self.geometry
    }

    /// The sampled working grid
    pub fn grid(&self) -> &RgbaImage {
        &self.grid
    }

    pub fn page(&self) -> PageSize {
        self.page
    }

    pub fn separations(&self) -> &SeparationTable {
        &self.separations
    }

    /// Dots for a single separation
    pub fn separation_dots(&self, separation: &Separation) -> Vec<Dot> {
        let compositor = Compositor::new(
            self.raster.as_ref(),
            self.params.channel_strategy,
            self.geometry.max_size,
        );
        let intensities = compositor.intensities(&self.grid, separation);
        place_dots(&intensities, &self.geometry, separation.angle)
    }

    /// Build the full drawing
    pub fn generate(&self) -> Drawing {
        self.generate_with_progress(|_| {})
    }

    /// Build the full drawing, reporting progress in `[0, 1]` after each separation
    pub fn generate_with_progress<F>(&self, progress_callback: F) -> Drawing
    where
        F: FnMut(f32),
    {
        self.emit(progress_callback).into_drawing()
    }

    /// Bundled finishing pipeline configured from the run parameters
    pub fn finisher(&self) -> VectorFinisher {
        VectorFinisher::new(self.params.tolerance, self.params.center)
    }

    /// Build the drawing and run it through `pipeline`
    pub fn render(&self, pipeline: &mut dyn FinishingPipeline) -> HalftoneResult<Document> {
        let emitter = self.emit(|_| {});
        let commands = if self.params.finishing {
            emitter.finishing_commands(self.params.merge_tolerance, self.params.tolerance)
        } else {
            emitter.color_commands()
        };
        let document = emitter.finish(pipeline, self.page, &commands)?;
        Ok(document)
    }

    fn emit<F>(&self, mut progress_callback: F) -> OutputEmitter
    where
        F: FnMut(f32),
    {
        let mut emitter = OutputEmitter::new(self.params.pen_width, self.params.fill_layers);
        let total = self.separations.len() as f32;

        progress_callback(0.0);
        for (i, separation) in self.separations.iter().enumerate() {
            let dots = self.separation_dots(separation);
            emitter.emit_separation(separation, dots);
            progress_callback((i + 1) as f32 / total);
        }

        info!(
            "Generated {} layers, {} dots",
            emitter.drawing().layer_count(),
            emitter.drawing().dot_count()
        );
        emitter
    }
}
