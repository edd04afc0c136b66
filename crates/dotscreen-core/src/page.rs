//! Page geometry
//!
//! Named paper sizes, orientation handling and the [`PageGeometry`] provider
//! trait used by the halftone generator to learn the physical page width.
//! Sizes are returned in CSS pixels, portrait first.

use crate::error::{Error, Result};
use crate::units::{parse_length, PX_PER_INCH, PX_PER_MM};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Width and height as listed in the page table
    Portrait,
    /// Width and height swapped
    Landscape,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Landscape
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "portrait"),
            Self::Landscape => write!(f, "landscape"),
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "portrait" => Ok(Self::Portrait),
            "landscape" => Ok(Self::Landscape),
            other => Err(Error::invalid_parameter(
                "orientation",
                format!("expected 'portrait' or 'landscape', got '{}'", other),
            )),
        }
    }
}

/// Physical page dimensions in CSS pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageSize {
    /// Page width
    pub width: f64,
    /// Page height
    pub height: f64,
}

impl PageSize {
    /// Create a page size from pixel dimensions
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Create a page size from millimeter dimensions
    pub fn from_mm(width_mm: f64, height_mm: f64) -> Self {
        Self::new(width_mm * PX_PER_MM, height_mm * PX_PER_MM)
    }

    /// Create a page size from inch dimensions
    pub fn from_inches(width_in: f64, height_in: f64) -> Self {
        Self::new(width_in * PX_PER_INCH, height_in * PX_PER_INCH)
    }

    /// Apply an orientation; landscape swaps the two sides
    pub fn oriented(self, orientation: Orientation) -> Self {
        match orientation {
            Orientation::Portrait => self,
            Orientation::Landscape => Self::new(self.height, self.width),
        }
    }
}

/// Named paper sizes, portrait dimensions in mm or inches
const NAMED_PAGES: &[(&str, f64, f64, bool)] = &[
    ("a6", 105.0, 148.0, false),
    ("a5", 148.0, 210.0, false),
    ("a4", 210.0, 297.0, false),
    ("a3", 297.0, 420.0, false),
    ("a2", 420.0, 594.0, false),
    ("a1", 594.0, 841.0, false),
    ("a0", 841.0, 1189.0, false),
    ("letter", 8.5, 11.0, true),
    ("legal", 8.5, 14.0, true),
    ("executive", 7.25, 10.5, true),
    ("tabloid", 11.0, 17.0, true),
];

/// Names accepted by [`StandardPages`], in table order
pub fn page_size_names() -> Vec<&'static str> {
    NAMED_PAGES.iter().map(|(name, ..)| *name).collect()
}

/// Supplies page dimensions for a named size and orientation
pub trait PageGeometry {
    /// Resolve `name` to oriented `(width, height)` in CSS pixels
    ///
    /// Unknown names are an `InvalidParameter` error.
    fn page_size(&self, name: &str, orientation: Orientation) -> Result<PageSize>;
}

/// Built-in paper table plus custom `"<w>x<h><unit>"` sizes
#[derive(Debug, Default, Clone, Copy)]
pub struct StandardPages;

impl StandardPages {
    fn lookup(name: &str) -> Option<PageSize> {
        NAMED_PAGES
            .iter()
            .find(|(n, ..)| *n == name)
            .map(|&(_, w, h, inches)| {
                if inches {
                    PageSize::from_inches(w, h)
                } else {
                    PageSize::from_mm(w, h)
                }
            })
    }

    /// Parse `"300x200mm"`; the unit suffix applies to both sides
    fn parse_custom(name: &str) -> Option<PageSize> {
        let (w, rest) = name.split_once('x')?;
        let unit_start = rest
            .find(|c: char| c.is_ascii_alphabetic())
            .unwrap_or(rest.len());
        let unit = &rest[unit_start..];
        let width = parse_length(&format!("{}{}", w, unit)).ok()?;
        let height = parse_length(rest).ok()?;
        if width <= 0.0 || height <= 0.0 {
            return None;
        }
        Some(PageSize::new(width, height))
    }
}

impl PageGeometry for StandardPages {
    fn page_size(&self, name: &str, orientation: Orientation) -> Result<PageSize> {
        let key = name.trim().to_lowercase();
        Self::lookup(&key)
            .or_else(|| Self::parse_custom(&key))
            .map(|size| size.oriented(orientation))
            .ok_or_else(|| {
                Error::invalid_parameter(
                    "page_size",
                    format!(
                        "unknown page size '{}' (expected one of {} or WxH with a unit)",
                        name,
                        page_size_names().join(", ")
                    ),
                )
            })
    }
}
