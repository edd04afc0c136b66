//! Vector finishing pipeline
//!
//! The halftone generator hands its [`Drawing`] to a [`FinishingPipeline`]
//! together with an ordered command list. [`VectorFinisher`] is the bundled
//! implementation: it tessellates every dot, optionally centers the result on
//! the page, then runs the commands in order.

use crate::document::{Document, DocumentLayer, Polyline};
use crate::drawing::Drawing;
use crate::error::{check_tolerance, VectorError, VectorResult};
use crate::optimizer::PathOptimizer;
use crate::tessellate::{dot_fill, dot_outline};
use dotscreen_core::{PageSize, Rgb};
use std::fmt;
use tracing::{debug, info};

/// One step of the finishing pipeline
#[derive(Debug, Clone, PartialEq)]
pub enum FinishingCommand {
    /// Override a layer's display color
    Color { layer: usize, color: Rgb },
    /// Join paths whose endpoints are within tolerance
    LineMerge { tolerance: f64 },
    /// Simplify paths within tolerance
    LineSimplify { tolerance: f64 },
    /// Canonicalize closed path start points
    Reloop,
    /// Reorder paths to reduce pen-up travel
    LineSort,
}

impl fmt::Display for FinishingCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color { layer, color } => write!(f, "color --layer {} {}", layer, color),
            Self::LineMerge { tolerance } => write!(f, "linemerge --tolerance {}", tolerance),
            Self::LineSimplify { tolerance } => {
                write!(f, "linesimplify --tolerance {}", tolerance)
            }
            Self::Reloop => write!(f, "reloop"),
            Self::LineSort => write!(f, "linesort"),
        }
    }
}

/// Consumes a finished drawing and produces plot-ready geometry
pub trait FinishingPipeline {
    /// Run `commands` in order over `drawing` placed on `page`
    fn finish(
        &mut self,
        drawing: &Drawing,
        page: PageSize,
        commands: &[FinishingCommand],
    ) -> VectorResult<Document>;
}

/// Bundled finishing pipeline
#[derive(Debug, Clone)]
pub struct VectorFinisher {
    /// Circle flattening tolerance in pixels
    pub tolerance: f64,
    /// Center the geometry's bounding box on the page before finishing
    pub center_on_page: bool,
}

impl Default for VectorFinisher {
    fn default() -> Self {
        Self {
            tolerance: 0.05 * dotscreen_core::PX_PER_MM,
            center_on_page: true,
        }
    }
}

impl VectorFinisher {
    pub fn new(tolerance: f64, center_on_page: bool) -> Self {
        Self {
            tolerance,
            center_on_page,
        }
    }

    /// Tessellate every layer of a drawing into a document
    pub fn tessellate(&self, drawing: &Drawing, page: PageSize) -> VectorResult<Document> {
        check_tolerance("tolerance", self.tolerance)?;

        let mut document = Document::new(page);
        for layer in drawing.layers() {
            let mut out = DocumentLayer::new(layer.id(), layer.stroke(), layer.pen_width());
            for dot in layer.dots() {
                if let Some(outline) = dot_outline(dot, self.tolerance) {
                    out.paths.push(outline);
                }
                if layer.fill().is_some() {
                    out.paths
                        .extend(dot_fill(dot, layer.pen_width(), self.tolerance));
                }
            }
            debug!(
                "Layer {}: {} dots tessellated into {} paths",
                layer.id(),
                layer.dots().len(),
                out.paths.len()
            );
            document.layers.push(out);
        }

        Ok(document)
    }

    /// Apply a single command to a document
    pub fn apply(document: &mut Document, command: &FinishingCommand) -> VectorResult<()> {
        match command {
            FinishingCommand::Color { layer, color } => {
                let target = document
                    .layer_mut(*layer)
                    .ok_or(VectorError::UnknownLayer(*layer))?;
                target.color = *color;
            }
            FinishingCommand::LineMerge { tolerance } => {
                check_tolerance("linemerge", *tolerance)?;
                Self::each_layer(document, |paths| PathOptimizer::merge(paths, *tolerance));
            }
            FinishingCommand::LineSimplify { tolerance } => {
                check_tolerance("linesimplify", *tolerance)?;
                Self::each_layer(document, |paths| PathOptimizer::simplify(paths, *tolerance));
            }
            FinishingCommand::Reloop => {
                for layer in &mut document.layers {
                    PathOptimizer::reloop(&mut layer.paths);
                }
            }
            FinishingCommand::LineSort => {
                Self::each_layer(document, PathOptimizer::sort);
            }
        }
        Ok(())
    }

    fn each_layer<F>(document: &mut Document, mut op: F)
    where
        F: FnMut(Vec<Polyline>) -> Vec<Polyline>,
    {
        for layer in &mut document.layers {
            let paths = std::mem::take(&mut layer.paths);
            layer.paths = op(paths);
        }
    }
}

impl FinishingPipeline for VectorFinisher {
    fn finish(
        &mut self,
        drawing: &Drawing,
        page: PageSize,
        commands: &[FinishingCommand],
    ) -> VectorResult<Document> {
        let mut document = self.tessellate(drawing, page)?;
        if self.center_on_page {
            document.center_on_page();
        }

        for command in commands {
            let before = document.pen_up_distance();
            Self::apply(&mut document, command)?;
            debug!(
                "{}: {} paths, pen-up {:.1} -> {:.1}",
                command,
                document.path_count(),
                before,
                document.pen_up_distance()
            );
        }

        info!(
            "Finished {} layers, {} paths, pen-up distance {:.1}",
            document.layers.len(),
            document.path_count(),
            document.pen_up_distance()
        );
        Ok(document)
    }
}
