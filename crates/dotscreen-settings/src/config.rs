//! Configuration for dotscreen
//!
//! Configuration is organized into sections mirroring a halftone run:
//! - Page: paper size, orientation and centering
//! - Halftone: grid density, scale, dot size and channel handling
//! - Pen: physical pen width and dot filling
//! - Output: tessellation and finishing tolerances
//!
//! Files are JSON or TOML, chosen by extension. Lengths are strings with a
//! unit suffix (`"0.3mm"`); bare numbers are CSS pixels.

use crate::error::{SettingsError, SettingsResult};
use dotscreen_core::{parse_length, Error, Orientation, PageGeometry, StandardPages};
use dotscreen_halftone::{ChannelStrategy, HalftoneParameters, ResampleFilter};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Page settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSettings {
    /// Named paper size or custom `WxH<unit>`
    pub size: String,
    pub orientation: Orientation,
    /// Center the drawing on the page
    pub center: bool,
}

impl Default for PageSettings {
    fn default() -> Self {
        Self {
            size: "a4".to_string(),
            orientation: Orientation::Landscape,
            center: true,
        }
    }
}

/// Halftone settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HalftoneSettings {
    /// Horizontal sample count
    pub num_x: u32,
    /// Fraction of the page width the grid spans
    pub scale: f64,
    /// Largest dot diameter relative to the cell pitch
    pub max_radius: f64,
    pub use_black_channel: bool,
    pub channel_strategy: ChannelStrategy,
    pub filter: ResampleFilter,
}

impl Default for HalftoneSettings {
    fn default() -> Self {
        Self {
            num_x: 100,
            scale: 0.8,
            max_radius: 0.7,
            use_black_channel: false,
            channel_strategy: ChannelStrategy::Proxy,
            filter: ResampleFilter::CatmullRom,
        }
    }
}

/// Pen settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PenSettings {
    pub width: String,
    pub fill_layers: bool,
}

impl Default for PenSettings {
    fn default() -> Self {
        Self {
            width: "0.3mm".to_string(),
            fill_layers: true,
        }
    }
}

/// Output settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Circle flattening and simplification tolerance
    pub tolerance: String,
    pub merge_tolerance: String,
    /// Run merge, simplify, reloop and sort
    pub finishing: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            tolerance: "0.05mm".to_string(),
            merge_tolerance: "0.05mm".to_string(),
            finishing: true,
        }
    }
}

/// Complete configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub page: PageSettings,
    pub halftone: HalftoneSettings,
    pub pen: PenSettings,
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

impl Format {
    fn of(path: &Path) -> SettingsResult<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("toml") => Ok(Self::Toml),
            other => Err(SettingsError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }
}

fn length(key: &str, value: &str) -> SettingsResult<f64> {
    parse_length(value).map_err(|reason| Error::invalid_parameter(key, reason).into())
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("dotscreen").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no platform config directory".to_string())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = Format::of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::LoadError {
            path: path.display().to_string(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match Format::of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::SaveError {
                path: parent.display().to_string(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::SaveError {
            path: path.display().to_string(),
            source,
        })?;

        Ok(())
    }

    /// Explicit file if given, else the default location if it exists, else
    /// defaults
    pub fn resolve(explicit: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = explicit {
            info!("Using config {}", path.display());
            return Self::load_from_file(path);
        }

        match Self::default_path() {
            Ok(path) if path.is_file() => {
                info!("Using config {}", path.display());
                Self::load_from_file(&path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        let params = self.to_parameters()?;
        params.validate()?;
        StandardPages.page_size(&params.page_size, params.orientation)?;
        Ok(())
    }

    /// Convert to run parameters, resolving lengths to pixels
    pub fn to_parameters(&self) -> SettingsResult<HalftoneParameters> {
        Ok(HalftoneParameters {
            page_size: self.page.size.clone(),
            orientation: self.page.orientation,
            center: self.page.center,
            num_x: self.halftone.num_x,
            scale: self.halftone.scale,
            use_black_channel: self.halftone.use_black_channel,
            pen_width: length("pen.width", &self.pen.width)?,
            max_radius: self.halftone.max_radius,
            fill_layers: self.pen.fill_layers,
            channel_strategy: self.halftone.channel_strategy,
            filter: self.halftone.filter,
            tolerance: length("output.tolerance", &self.output.tolerance)?,
            merge_tolerance: length("output.merge_tolerance", &self.output.merge_tolerance)?,
            finishing: self.output.finishing,
        })
    }
}
