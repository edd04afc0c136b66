//! Drawing model
//!
//! A [`Drawing`] is the append-only result of halftone generation: one layer
//! per separation, each an ordered list of [`Dot`]s. Dots keep their center in
//! the separation's rotated frame together with the rotation itself, so no
//! transform stack is needed to place them.

use dotscreen_core::Rgb;
use nalgebra::{Point2, Rotation2};

/// A circle emitted by the halftone generator
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dot {
    center: Point2<f64>,
    radius: f64,
    rotation: f64,
}

impl Dot {
    /// Create a dot from its local center, radius and frame rotation in degrees
    pub fn new(center: Point2<f64>, radius: f64, rotation: f64) -> Self {
        Self {
            center,
            radius,
            rotation,
        }
    }

    /// Center in the rotated local frame
    pub fn center(&self) -> Point2<f64> {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Frame rotation in degrees
    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    /// Center on the page: the local center rotated about the drawing origin
    pub fn page_center(&self) -> Point2<f64> {
        Rotation2::new(self.rotation.to_radians()) * self.center
    }
}

/// One separation's dots plus its display attributes
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    id: usize,
    stroke: Rgb,
    fill: Option<Rgb>,
    pen_width: f64,
    dots: Vec<Dot>,
}

impl Layer {
    /// 1-based layer id
    pub fn id(&self) -> usize {
        self.id
    }

    pub fn stroke(&self) -> Rgb {
        self.stroke
    }

    pub fn fill(&self) -> Option<Rgb> {
        self.fill
    }

    pub fn pen_width(&self) -> f64 {
        self.pen_width
    }

    pub fn dots(&self) -> &[Dot] {
        &self.dots
    }
}

/// Ordered, append-only collection of layers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Drawing {
    layers: Vec<Layer>,
}

impl Drawing {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a layer and return its 1-based id
    pub fn add_layer(
        &mut self,
        stroke: Rgb,
        fill: Option<Rgb>,
        pen_width: f64,
        dots: Vec<Dot>,
    ) -> usize {
        let id = self.layers.len() + 1;
        self.layers.push(Layer {
            id,
            stroke,
            fill,
            pen_width,
            dots,
        });
        id
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, id: usize) -> Option<&Layer> {
        id.checked_sub(1).and_then(|idx| self.layers.get(idx))
    }

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Total number of dots across all layers
    pub fn dot_count(&self) -> usize {
        self.layers.iter().map(|l| l.dots.len()).sum()
    }
}
