//! Finished documents
//!
//! A [`Document`] is what the finishing pipeline produces from a drawing:
//! plain polylines grouped in colored layers, positioned on a page.

use dotscreen_core::{PageSize, Rgb};
use nalgebra::{distance, Point2, Vector2};

/// An open or closed sequence of points
///
/// Closed polylines do not repeat their first point at the end.
#[derive(Debug, Clone, PartialEq)]
pub struct Polyline {
    pub points: Vec<Point2<f64>>,
    pub closed: bool,
}

impl Polyline {
    pub fn new(points: Vec<Point2<f64>>, closed: bool) -> Self {
        Self { points, closed }
    }

    pub fn open(points: Vec<Point2<f64>>) -> Self {
        Self::new(points, false)
    }

    pub fn closed(points: Vec<Point2<f64>>) -> Self {
        Self::new(points, true)
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn first(&self) -> Option<Point2<f64>> {
        self.points.first().copied()
    }

    /// Where the pen lifts: the last point, or the first for closed paths
    pub fn end(&self) -> Option<Point2<f64>> {
        if self.closed {
            self.first()
        } else {
            self.points.last().copied()
        }
    }

    pub fn reverse(&mut self) {
        self.points.reverse();
    }

    /// Drawn length including the closing segment
    pub fn length(&self) -> f64 {
        let mut total: f64 = self
            .points
            .windows(2)
            .map(|w| distance(&w[0], &w[1]))
            .sum();
        if self.closed && self.points.len() > 2 {
            if let (Some(first), Some(last)) = (self.points.first(), self.points.last()) {
                total += distance(last, first);
            }
        }
        total
    }

    pub fn translate(&mut self, offset: Vector2<f64>) {
        for p in &mut self.points {
            *p += offset;
        }
    }
}

/// A finished layer
#[derive(Debug, Clone, PartialEq)]
pub struct DocumentLayer {
    /// 1-based layer id, matching the drawing layer it came from
    pub id: usize,
    pub color: Rgb,
    pub pen_width: f64,
    pub paths: Vec<Polyline>,
}

impl DocumentLayer {
    pub fn new(id: usize, color: Rgb, pen_width: f64) -> Self {
        Self {
            id,
            color,
            pen_width,
            paths: Vec::new(),
        }
    }

    /// Pen-up travel from the origin through every path in order
    pub fn pen_up_distance(&self) -> f64 {
        let mut pos = Point2::origin();
        let mut total = 0.0;
        for path in &self.paths {
            if let (Some(start), Some(end)) = (path.first(), path.end()) {
                total += distance(&pos, &start);
                pos = end;
            }
        }
        total
    }

    /// Total drawn length of every path
    pub fn pen_down_distance(&self) -> f64 {
        self.paths.iter().map(Polyline::length).sum()
    }
}

/// Multi-layer vector output on a page
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page: PageSize,
    pub layers: Vec<DocumentLayer>,
}

impl Document {
    pub fn new(page: PageSize) -> Self {
        Self {
            page,
            layers: Vec::new(),
        }
    }

    pub fn layer(&self, id: usize) -> Option<&DocumentLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn layer_mut(&mut self, id: usize) -> Option<&mut DocumentLayer> {
        self.layers.iter_mut().find(|l| l.id == id)
    }

    pub fn path_count(&self) -> usize {
        self.layers.iter().map(|l| l.paths.len()).sum()
    }

    pub fn pen_up_distance(&self) -> f64 {
        self.layers.iter().map(DocumentLayer::pen_up_distance).sum()
    }

    pub fn pen_down_distance(&self) -> f64 {
        self.layers.iter().map(DocumentLayer::pen_down_distance).sum()
    }

    /// Bounding box `(min_x, min_y, max_x, max_y)` of all points
    pub fn bounds(&self) -> Option<(f64, f64, f64, f64)> {
        let mut points = self
            .layers
            .iter()
            .flat_map(|l| l.paths.iter())
            .flat_map(|p| p.points.iter())
            .peekable();
        points.peek()?;

        let mut min_x = f64::INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut max_y = f64::NEG_INFINITY;
        for p in points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some((min_x, min_y, max_x, max_y))
    }

    pub fn translate(&mut self, offset: Vector2<f64>) {
        for path in self.layers.iter_mut().flat_map(|l| l.paths.iter_mut()) {
            path.translate(offset);
        }
    }

    /// Move the geometry so its bounding box is centered on the page
    pub fn center_on_page(&mut self) {
        if let Some((min_x, min_y, max_x, max_y)) = self.bounds() {
            let offset = Vector2::new(
                (self.page.width - (max_x - min_x)) / 2.0 - min_x,
                (self.page.height - (max_y - min_y)) / 2.0 - min_y,
            );
            self.translate(offset);
        }
    }
}
