//! Intensity sampler
//!
//! Reduces the source image to the coarse `num_x × num_y` working grid. One
//! grid cell becomes one halftone dot, so `num_x` sets the screen density.

use dotscreen_core::{Error, Result};
use image::imageops::FilterType;
use image::{DynamicImage, RgbaImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Resampling filter used to shrink the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ResampleFilter {
    Nearest,
    Triangle,
    CatmullRom,
    Gaussian,
    Lanczos3,
}

impl Default for ResampleFilter {
    fn default() -> Self {
        Self::CatmullRom
    }
}

impl From<ResampleFilter> for FilterType {
    fn from(value: ResampleFilter) -> Self {
        match value {
            ResampleFilter::Nearest => FilterType::Nearest,
            ResampleFilter::Triangle => FilterType::Triangle,
            ResampleFilter::CatmullRom => FilterType::CatmullRom,
            ResampleFilter::Gaussian => FilterType::Gaussian,
            ResampleFilter::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl fmt::Display for ResampleFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Nearest => write!(f, "nearest"),
            Self::Triangle => write!(f, "triangle"),
            Self::CatmullRom => write!(f, "catmull-rom"),
            Self::Gaussian => write!(f, "gaussian"),
            Self::Lanczos3 => write!(f, "lanczos3"),
        }
    }
}

impl FromStr for ResampleFilter {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "nearest" => Ok(Self::Nearest),
            "triangle" | "bilinear" => Ok(Self::Triangle),
            "catmull-rom" | "catmullrom" | "bicubic" => Ok(Self::CatmullRom),
            "gaussian" => Ok(Self::Gaussian),
            "lanczos3" | "lanczos" => Ok(Self::Lanczos3),
            other => Err(Error::invalid_parameter(
                "filter",
                format!("unknown resampling filter '{}'", other),
            )),
        }
    }
}

/// Number of grid rows for `num_x` columns, preserving aspect ratio
pub fn grid_rows(num_x: u32, width: u32, height: u32) -> u32 {
    (num_x as u64 * height as u64 / width.max(1) as u64) as u32
}

/// Downsample `image` to `num_x` columns and proportionally many rows
///
/// Rows are `floor(num_x · height / width)`, which may be zero for very wide
/// images; the grid is then empty.
pub fn sample(image: &DynamicImage, num_x: u32, filter: ResampleFilter) -> Result<RgbaImage> {
    if num_x < 1 {
        return Err(Error::invalid_parameter("num_x", "must be at least 1"));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(Error::invalid_parameter(
            "image",
            "source image has no pixels",
        ));
    }

    let num_y = grid_rows(num_x, image.width(), image.height());
    if num_y == 0 {
        warn!(
            "Image {}x{} is too wide for {} columns; sampled grid is empty",
            image.width(),
            image.height(),
            num_x
        );
        return Ok(RgbaImage::new(num_x, 0));
    }

    let rgba = image.to_rgba8();
    Ok(image::imageops::resize(&rgba, num_x, num_y, filter.into()))
}
