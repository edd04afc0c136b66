//! Output emitter
//!
//! Collects one layer per separation, then builds the finishing command list:
//! nominal color overrides first, followed by path cleanup.

use crate::separation::Separation;
use dotscreen_core::{PageSize, Rgb};
use dotscreen_vector::{
    Document, Dot, Drawing, FinishingCommand, FinishingPipeline, VectorResult,
};
use tracing::{debug, info};

/// Layers that receive a nominal color override (C, M, Y, K)
pub const NOMINAL_LAYERS: usize = 4;

/// Accumulates the halftone drawing and hands it to a finishing pipeline
#[derive(Debug, Clone)]
pub struct OutputEmitter {
    drawing: Drawing,
    /// Nominal color of each emitted layer, by layer id - 1
    nominal: Vec<Rgb>,
    pen_width: f64,
    fill_layers: bool,
}

impl OutputEmitter {
    pub fn new(pen_width: f64, fill_layers: bool) -> Self {
        Self {
            drawing: Drawing::new(),
            nominal: Vec::new(),
            pen_width,
            fill_layers,
        }
    }

    /// Append a separation's dots as a new layer and return the layer id
    pub fn emit_separation(&mut self, separation: &Separation, dots: Vec<Dot>) -> usize {
        let fill = self.fill_layers.then_some(separation.color);
        let count = dots.len();
        let id = self
            .drawing
            .add_layer(separation.color, fill, self.pen_width, dots);
        self.nominal.push(separation.color);
        debug!("Layer {} ({}): {} dots", id, separation.name, count);
        id
    }

    pub fn drawing(&self) -> &Drawing {
        &self.drawing
    }

    pub fn into_drawing(self) -> Drawing {
        self.drawing
    }

    /// Nominal color overrides for the first four emitted layers
    pub fn color_commands(&self) -> Vec<FinishingCommand> {
        self.nominal
            .iter()
            .take(NOMINAL_LAYERS)
            .enumerate()
            .map(|(i, color)| FinishingCommand::Color {
                layer: i + 1,
                color: *color,
            })
            .collect()
    }

    /// Color overrides, then merge, simplify, reloop and sort
    pub fn finishing_commands(
        &self,
        merge_tolerance: f64,
        simplify_tolerance: f64,
    ) -> Vec<FinishingCommand> {
        let mut commands = self.color_commands();
        commands.extend([
            FinishingCommand::LineMerge {
                tolerance: merge_tolerance,
            },
            FinishingCommand::LineSimplify {
                tolerance: simplify_tolerance,
            },
            FinishingCommand::Reloop,
            FinishingCommand::LineSort,
        ]);
        commands
    }

    /// Run `commands` over the accumulated drawing
    pub fn finish(
        &self,
        pipeline: &mut dyn FinishingPipeline,
        page: PageSize,
        commands: &[FinishingCommand],
    ) -> VectorResult<Document> {
        info!(
            "Finishing {} layers, {} dots: {}",
            self.drawing.layer_count(),
            self.drawing.dot_count(),
            commands
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ")
        );
        pipeline.finish(&self.drawing, page, commands)
    }
}
