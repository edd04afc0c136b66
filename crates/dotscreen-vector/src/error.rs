//! Error types for the vector crate.

use std::io;
use thiserror::Error;

/// Errors raised while finishing or writing a drawing.
#[derive(Error, Debug)]
pub enum VectorError {
    /// A finishing command referenced a layer the drawing does not have.
    #[error("Unknown layer {0}")]
    UnknownLayer(usize),

    /// A tolerance or width was zero, negative or not finite.
    #[error("Invalid tolerance for '{name}': {value}")]
    InvalidTolerance { name: String, value: f64 },

    /// I/O error while writing output.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

/// Result type alias for vector operations.
pub type VectorResult<T> = Result<T, VectorError>;

/// Reject tolerances that would stall flattening or simplification.
pub(crate) fn check_tolerance(name: &str, value: f64) -> VectorResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(VectorError::InvalidTolerance {
            name: name.to_string(),
            value,
        })
    }
}
