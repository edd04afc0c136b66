//! Channel extraction strategies
//!
//! A separation reads one intensity per canvas pixel. `Proxy` reads the raw
//! RGBA component, which reproduces the established plotter output; the
//! black pass then reads alpha and stays empty on opaque images.
//! `Subtractive` derives naive CMYK ink amounts first, so every pass, black
//! included, tracks the ink it is named after.
//!
//! Either way lower values mean more ink and larger dots.

use dotscreen_core::{Error, Result};
use image::Rgba;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How a separation turns a canvas pixel into an intensity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChannelStrategy {
    /// Raw RGBA component at the channel index
    Proxy,
    /// Inverted naive CMYK ink at the channel index
    Subtractive,
}

impl Default for ChannelStrategy {
    fn default() -> Self {
        Self::Proxy
    }
}

impl ChannelStrategy {
    /// Intensity of `pixel` for `channel` (0..=3); 255 means no ink
    ///
    /// Panics on a channel index above 3.
    pub fn intensity(self, pixel: &Rgba<u8>, channel: usize) -> u8 {
        match self {
            Self::Proxy => pixel.0[channel],
            Self::Subtractive => {
                let [r, g, b, _] = pixel.0;
                // C = 255 - R, M = 255 - G, Y = 255 - B, K = 255 - max(R, G, B);
                // intensity is 255 - ink
                match channel {
                    0 => r,
                    1 => g,
                    2 => b,
                    3 => r.max(g).max(b),
                    _ => panic!("channel index {} out of range", channel),
                }
            }
        }
    }
}

impl fmt::Display for ChannelStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Proxy => write!(f, "proxy"),
            Self::Subtractive => write!(f, "subtractive"),
        }
    }
}

impl FromStr for ChannelStrategy {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "proxy" => Ok(Self::Proxy),
            "subtractive" | "cmyk" => Ok(Self::Subtractive),
            other => Err(Error::invalid_parameter(
                "channel_strategy",
                format!("expected 'proxy' or 'subtractive', got '{}'", other),
            )),
        }
    }
}
