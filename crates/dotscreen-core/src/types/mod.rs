//! Shared value types.
//!
//! ## Modules
//!
//! - [`color`]: RGB display colors for separation layers

pub mod color;

pub use color::Rgb;
