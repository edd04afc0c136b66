//! # dotscreen Halftone
//!
//! Rotated dot-grid CMYK halftoning for pen plotters.
//!
//! - **Sampler**: shrinks the source image to a `num_x` column grid
//! - **Compositor**: rotates the grid per separation onto a shared white canvas
//! - **Radius mapping**: darker cells give larger dots
//! - **Placement**: one dot per canvas cell in the separation's rotated frame
//! - **Emitter**: one layer per separation, handed to a finishing pipeline
//!
//! [`HalftoneGenerator`] wires these together.

pub mod channel;
pub mod compositor;
pub mod emitter;
pub mod error;
pub mod generator;
pub mod geometry;
pub mod placement;
pub mod radius;
pub mod raster;
pub mod sampler;
pub mod separation;

pub use channel::ChannelStrategy;
pub use compositor::Compositor;
pub use emitter::OutputEmitter;
pub use error::{HalftoneError, HalftoneResult};
pub use generator::{HalftoneGenerator, HalftoneParameters};
pub use geometry::{map_range, RunGeometry};
pub use placement::place_dots;
pub use radius::dot_radius;
pub use raster::{BilinearRaster, RasterOps};
pub use sampler::{sample, ResampleFilter};
pub use separation::{Separation, SeparationTable, LAYER_COLORS, SCREEN_ANGLES};
