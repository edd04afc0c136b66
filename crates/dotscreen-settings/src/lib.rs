//! dotscreen Settings Crate
//!
//! Loads, validates and saves the configuration for a halftone run and turns
//! it into [`dotscreen_halftone::HalftoneParameters`].

pub mod config;
pub mod error;

pub use config::{Config, HalftoneSettings, OutputSettings, PageSettings, PenSettings};
pub use error::{SettingsError, SettingsResult};
