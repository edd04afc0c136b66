//! # dotscreen Vector
//!
//! Vector side of the halftone pipeline:
//!
//! - **Drawing**: append-only layers of rotated-frame dots
//! - **Tessellation**: dots flattened to closed polylines with lyon
//! - **Finishing**: color overrides, line merging, simplification, reloop and
//!   sorting behind the [`FinishingPipeline`] trait
//! - **SVG**: layered SVG output for plotting software

pub mod document;
pub mod drawing;
pub mod error;
pub mod finishing;
pub mod optimizer;
pub mod svg;
pub mod tessellate;

pub use document::{Document, DocumentLayer, Polyline};
pub use drawing::{Dot, Drawing, Layer};
pub use error::{VectorError, VectorResult};
pub use finishing::{FinishingCommand, FinishingPipeline, VectorFinisher};
pub use optimizer::PathOptimizer;
pub use svg::{render_svg, save_svg};
