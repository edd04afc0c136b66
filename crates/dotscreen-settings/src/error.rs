//! Error types for the settings crate.
//!
//! File and format problems have their own variants; invalid values surface
//! as the core `InvalidParameter` error so callers see one kind for every
//! rejected setting.

use dotscreen_core::Error as CoreError;
use dotscreen_halftone::HalftoneError;
use std::io;
use thiserror::Error;

/// Errors that can occur during settings operations.
#[derive(Error, Debug)]
pub enum SettingsError {
    /// The configuration file could not be read.
    #[error("Failed to load settings from {path}: {source}")]
    LoadError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The configuration file could not be written.
    #[error("Failed to save settings to {path}: {source}")]
    SaveError {
        path: String,
        #[source]
        source: io::Error,
    },

    /// The file extension is neither `.json` nor `.toml`.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    /// The platform configuration directory could not be found.
    #[error("Config directory error: {0}")]
    ConfigDirectory(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// TOML deserialization error.
    #[error("TOML error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("TOML error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// A setting has an invalid value.
    #[error(transparent)]
    Invalid(#[from] CoreError),
}

impl From<HalftoneError> for SettingsError {
    fn from(err: HalftoneError) -> Self {
        match err {
            HalftoneError::Core(e) => Self::Invalid(e),
            other => Self::Invalid(CoreError::other(other.to_string())),
        }
    }
}

impl SettingsError {
    pub fn is_invalid_parameter(&self) -> bool {
        matches!(self, Self::Invalid(e) if e.is_invalid_parameter())
    }
}

/// Result type alias for settings operations.
pub type SettingsResult<T> = Result<T, SettingsError>;
