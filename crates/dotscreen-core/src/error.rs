//! Error handling for dotscreen
//!
//! Provides the error kinds shared by every layer of the halftone pipeline:
//! - Parameter errors (out-of-range or unknown configuration values)
//! - Image load errors (missing, corrupt or undecodable source images)
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for dotscreen
///
/// Both parameter and image errors are fatal: they are raised before any
/// geometry is emitted and there is no partial output.
#[derive(Error, Debug)]
pub enum Error {
    /// A configuration value is out of range or unknown
    #[error("Invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// The source image could not be loaded
    #[error("Failed to load image '{path}': {reason}")]
    ImageLoad {
        /// The path that was being loaded.
        path: String,
        /// The decoder or file system failure.
        reason: String,
    },

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an invalid parameter error
    pub fn invalid_parameter(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Create an image load error
    pub fn image_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::ImageLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a parameter error
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Error::InvalidParameter { .. })
    }

    /// Check if this is an image load error
    pub fn is_image_load(&self) -> bool {
        matches!(self, Error::ImageLoad { .. })
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
