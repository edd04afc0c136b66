//! Error types for the halftone crate.
//!
//! Parameter and image errors come from `dotscreen-core`; finishing errors
//! come from the vector pipeline. Nothing inside the dot-emission loop can
//! fail.

use dotscreen_core::Error as CoreError;
use dotscreen_vector::VectorError;
use thiserror::Error;

/// Errors that can occur while generating a halftone.
#[derive(Error, Debug)]
pub enum HalftoneError {
    /// Invalid parameters or an unreadable source image.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The finishing pipeline rejected the drawing.
    #[error("Finishing failed: {0}")]
    Finishing(#[from] VectorError),
}

impl HalftoneError {
    /// Shorthand for an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::invalid_parameter(name, reason).into()
    }

    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_invalid_parameter())
    }

    pub fn is_image_load(&self) -> bool {
        matches!(self, Self::Core(e) if e.is_image_load())
    }
}

/// Result type alias for halftone operations.
pub type HalftoneResult<T> = Result<T, HalftoneError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kinds() {
        let err = HalftoneError::invalid_parameter("num_x", "must be at least 1");
        assert!(err.is_invalid_parameter());
        assert!(!err.is_image_load());
        assert_eq!(
            err.to_string(),
            "Invalid parameter 'num_x': must be at least 1"
        );

        let err: HalftoneError = CoreError::image_load("a.png", "not found").into();
        assert!(err.is_image_load());
    }

    #[test]
    fn test_finishing_error_conversion() {
        let err: HalftoneError = VectorError::UnknownLayer(5).into();
        assert_eq!(err.to_string(), "Finishing failed: Unknown layer 5");
    }
}
