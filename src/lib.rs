//! # dotscreen
//!
//! Turns raster images into rotated dot-grid CMYK halftone separations for
//! pen plotters.
//!
//! ## Architecture
//!
//! dotscreen is organized as a workspace with multiple crates:
//!
//! 1. **dotscreen-core** - Errors, units, page sizes, colors
//! 2. **dotscreen-halftone** - Sampling, per-separation compositing, dot placement
//! 3. **dotscreen-vector** - Drawing model, tessellation, finishing, SVG output
//! 4. **dotscreen-settings** - JSON/TOML configuration
//! 5. **dotscreen** - Command-line binary that wires them together

use anyhow::Context;
use clap::Parser;
use std::path::{Path, PathBuf};
use tracing::info;

pub use dotscreen_core::{Error, Orientation, PageSize, Result, Rgb};
pub use dotscreen_halftone::{
    ChannelStrategy, HalftoneError, HalftoneGenerator, HalftoneParameters, ResampleFilter,
};
pub use dotscreen_settings::{Config, SettingsError};
pub use dotscreen_vector::{render_svg, save_svg, Document, Drawing, VectorFinisher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, human readable or JSON lines
/// - RUST_LOG environment variable support, `info` by default
pub fn init_logging(json: bool) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if json {
        let fmt_layer = fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    } else {
        let fmt_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true)
            .with_line_number(true);
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()?;
    }

    Ok(())
}

/// Version string shown by `--version`
pub const LONG_VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BUILD_DATE"), ")");

/// Command-line arguments of one halftone run
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "dotscreen", version = LONG_VERSION, about)]
pub struct Args {
    /// Source image
    pub image: PathBuf,

    /// Output SVG, defaults to the image path with an `.svg` extension
    pub output: Option<PathBuf>,

    /// Configuration file (.toml or .json)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Args {
    /// Where the SVG is written
    pub fn output_path(&self) -> PathBuf {
        self.output
            .clone()
            .unwrap_or_else(|| default_output(&self.image))
    }
}

/// Default output path: the image path with an `.svg` extension
pub fn default_output(image: &Path) -> PathBuf {
    image.with_extension("svg")
}

/// Counts reported after a run
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub layers: usize,
    pub dots: usize,
    pub paths: usize,
    /// Pen-up travel in CSS pixels
    pub pen_up: f64,
    /// Drawn length in CSS pixels
    pub pen_down: f64,
}

/// Load configuration, generate, finish and write the SVG
pub fn run(args: &Args) -> anyhow::Result<RunSummary> {
    let config =
        Config::resolve(args.config.as_deref()).context("Failed to load configuration")?;
    let params = config.to_parameters().context("Invalid configuration")?;

    let generator = HalftoneGenerator::from_file(&args.image, params)
        .with_context(|| format!("Failed to prepare halftone for {}", args.image.display()))?;

    let dots = generator.geometry().dots_per_separation() * generator.separations().len();
    let mut finisher = generator.finisher();
    let document = generator
        .render(&mut finisher)
        .context("Failed to finish drawing")?;

    let output = args.output_path();
    save_svg(&document, &output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    let summary = RunSummary {
        layers: document.layers.len(),
        dots,
        paths: document.path_count(),
        pen_up: document.pen_up_distance(),
        pen_down: document.pen_down_distance(),
    };
    info!(
        "Wrote {}: {} layers, {} dots, {} paths, pen-down {}, pen-up travel {}",
        output.display(),
        summary.layers,
        summary.dots,
        summary.paths,
        dotscreen_core::format_length(summary.pen_down, dotscreen_core::LengthUnit::Mm),
        dotscreen_core::format_length(summary.pen_up, dotscreen_core::LengthUnit::Mm)
    );
    Ok(summary)
}
