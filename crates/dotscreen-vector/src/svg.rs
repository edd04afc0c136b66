//! SVG output
//!
//! Writes a finished [`Document`] as a plotter-friendly SVG: one Inkscape
//! layer group per document layer, closed paths as `<polygon>`, open paths as
//! `<polyline>`. Coordinates stay in CSS pixels; the page size is also given
//! in millimeters so plotting software picks up the physical scale.

use crate::document::{Document, Polyline};
use crate::error::VectorResult;
use dotscreen_core::{units::px_to, LengthUnit};
use std::fmt::Write as _;
use std::path::Path;

fn points_attr(path: &Polyline) -> String {
    let mut out = String::new();
    for (i, p) in path.points.iter().enumerate() {
        if i > 0 {
            out.push(' ');
        }
        let _ = write!(out, "{:.3},{:.3}", p.x, p.y);
    }
    out
}

/// Render a document to an SVG string
pub fn render_svg(document: &Document) -> String {
    let page = document.page;
    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="no"?>
<svg width="{:.2}mm" height="{:.2}mm" viewBox="0 0 {:.3} {:.3}" xmlns="http://www.w3.org/2000/svg" xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape">
"#,
        px_to(page.width, LengthUnit::Mm),
        px_to(page.height, LengthUnit::Mm),
        page.width,
        page.height
    ));
    svg.push_str(&format!(
        "<!-- dotscreen {} -->\n",
        chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
    ));

    for layer in &document.layers {
        svg.push_str(&format!(
            r#"<g inkscape:groupmode="layer" inkscape:label="{}" id="layer{}" style="fill:none;stroke:{};stroke-width:{:.3};stroke-linecap:round;stroke-linejoin:round">
"#,
            layer.id,
            layer.id,
            layer.color.to_hex(),
            layer.pen_width
        ));
        for path in &layer.paths {
            let tag = if path.closed { "polygon" } else { "polyline" };
            svg.push_str(&format!("<{} points=\"{}\"/>\n", tag, points_attr(path)));
        }
        svg.push_str("</g>\n");
    }

    svg.push_str("</svg>\n");
    svg
}

/// Write a document as SVG
pub fn save_svg(document: &Document, path: &Path) -> VectorResult<()> {
    std::fs::write(path, render_svg(document))?;
    Ok(())
}
