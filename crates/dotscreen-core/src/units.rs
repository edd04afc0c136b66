//! Unit conversion utilities
//!
//! All drawing geometry is expressed in CSS pixels (96 per inch), the unit
//! plotter SVG tooling works in. Lengths typed by the user ("0.3mm", "2in")
//! are parsed into pixels here.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// CSS pixels per inch
pub const PX_PER_INCH: f64 = 96.0;

/// CSS pixels per millimeter
pub const PX_PER_MM: f64 = PX_PER_INCH / 25.4;

/// Length unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// CSS pixel
    Px,
    /// Inch
    In,
    /// Millimeter
    Mm,
    /// Centimeter
    Cm,
    /// Point (1/72 in)
    Pt,
    /// Pica (12 pt)
    Pc,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Px
    }
}

impl LengthUnit {
    /// Number of CSS pixels in one of this unit
    pub fn to_px_factor(self) -> f64 {
        match self {
            Self::Px => 1.0,
            Self::In => PX_PER_INCH,
            Self::Mm => PX_PER_MM,
            Self::Cm => PX_PER_MM * 10.0,
            Self::Pt => PX_PER_INCH / 72.0,
            Self::Pc => PX_PER_INCH / 6.0,
        }
    }

    /// Unit suffix as written in length strings
    pub fn label(self) -> &'static str {
        match self {
            Self::Px => "px",
            Self::In => "in",
            Self::Mm => "mm",
            Self::Cm => "cm",
            Self::Pt => "pt",
            Self::Pc => "pc",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "px" => Ok(Self::Px),
            "in" | "inch" => Ok(Self::In),
            "mm" => Ok(Self::Mm),
            "cm" => Ok(Self::Cm),
            "pt" => Ok(Self::Pt),
            "pc" => Ok(Self::Pc),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

/// Split a length string into its numeric part and unit suffix
fn split_unit(input: &str) -> (&str, &str) {
    let idx = input
        .find(|c: char| c.is_ascii_alphabetic())
        .unwrap_or(input.len());
    (input[..idx].trim(), input[idx..].trim())
}

/// Parse a length string to CSS pixels
///
/// * `input` - Number with optional unit suffix, e.g. `"0.3mm"` or `"12"`
///
/// Bare numbers are taken as pixels.
pub fn parse_length(input: &str) -> Result<f64, String> {
    let input = input.trim();
    if input.is_empty() {
        return Err("Empty length".to_string());
    }

    let (number, unit) = split_unit(input);
    let value = number
        .parse::<f64>()
        .map_err(|_| format!("Invalid length: {}", input))?;
    let unit = unit.parse::<LengthUnit>()?;

    Ok(value * unit.to_px_factor())
}

/// Convert a pixel length to the given unit
pub fn px_to(value_px: f64, unit: LengthUnit) -> f64 {
    value_px / unit.to_px_factor()
}

/// Format a pixel length for display in the given unit
///
/// * `value_px` - Value in CSS pixels
/// * `unit` - Target unit
pub fn format_length(value_px: f64, unit: LengthUnit) -> String {
    format!("{:.3}{}", px_to(value_px, unit), unit.label())
}
