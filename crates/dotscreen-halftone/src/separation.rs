//! Separation table
//!
//! Each separation is one single-color pass of the halftone: a screen angle,
//! the canvas channel it reads, and the color its layer is plotted in. The
//! table is built once per run and never changes afterwards.

use dotscreen_core::Rgb;

/// Screen angles in degrees for cyan, magenta, yellow and black
pub const SCREEN_ANGLES: [f64; 4] = [15.0, 75.0, 0.0, 45.0];

/// Nominal layer colors, in separation order
pub const LAYER_COLORS: [Rgb; 4] = [Rgb::CYAN, Rgb::MAGENTA, Rgb::YELLOW, Rgb::BLACK];

const NAMES: [&str; 4] = ["cyan", "magenta", "yellow", "black"];

/// One halftone pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Separation {
    pub name: &'static str,
    /// Screen angle in degrees
    pub angle: f64,
    /// Index into the composited pixel tuple
    pub channel: usize,
    pub color: Rgb,
}

impl Separation {
    fn standard(index: usize) -> Self {
        Self {
            name: NAMES[index],
            angle: SCREEN_ANGLES[index],
            channel: index,
            color: LAYER_COLORS[index],
        }
    }
}

/// Ordered, immutable list of separations for a run
#[derive(Debug, Clone, PartialEq)]
pub struct SeparationTable {
    separations: Vec<Separation>,
}

impl SeparationTable {
    /// The four standard separations, plus an extra black pass when
    /// `use_black_channel` is set. The extra pass reuses angle and channel
    /// index 3.
    pub fn new(use_black_channel: bool) -> Self {
        let mut separations: Vec<Separation> = (0..4).map(Separation::standard).collect();
        if use_black_channel {
            separations.push(Separation {
                name: "key",
                ..Separation::standard(3)
            });
        }
        Self { separations }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Separation> {
        self.separations.iter()
    }

    pub fn len(&self) -> usize {
        self.separations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.separations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Separation> {
        self.separations.get(index)
    }
}
