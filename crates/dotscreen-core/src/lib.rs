//! # dotscreen Core
//!
//! Core types and utilities shared by the dotscreen crates: the error kinds
//! of the halftone pipeline, length units, page geometry and layer colors.

pub mod error;
pub mod page;
pub mod types;
pub mod units;

pub use error::{Error, Result};
pub use page::{page_size_names, Orientation, PageGeometry, PageSize, StandardPages};
pub use types::Rgb;
pub use units::{format_length, parse_length, LengthUnit, PX_PER_INCH, PX_PER_MM};
