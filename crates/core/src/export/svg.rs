//! SVG export through the plotters SVG backend.

use std::path::Path;

use plotters::backend::SVGBackend;
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::element::{PathElement, Polygon, Text};
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{FontTransform, IntoFont, RGBAColor, ShapeStyle};
use thiserror::Error;
use tracing::debug;

use crate::chart::{ChartScene, Element, Label, Point, Rgba, Stroke, TextAnchor};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("drawing failed: {0}")]
    Draw(String),
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

type SvgArea<'a> = DrawingArea<SVGBackend<'a>, Shift>;

fn draw_err(e: impl std::fmt::Display) -> ExportError {
    ExportError::Draw(e.to_string())
}

fn color(c: Rgba) -> RGBAColor {
    RGBAColor(c.r, c.g, c.b, c.a)
}

fn px(p: Point) -> (i32, i32) {
    (p.x.round() as i32, p.y.round() as i32)
}

fn line_style(stroke: &Stroke) -> ShapeStyle {
    ShapeStyle {
        color: color(stroke.color),
        filled: false,
        stroke_width: stroke.width.round().max(1.0) as u32,
    }
}

fn draw_polyline(area: &SvgArea<'_>, points: &[Point], stroke: &Stroke) -> Result<(), ExportError> {
    let coords: Vec<(i32, i32)> = points.iter().copied().map(px).collect();
    area.draw(&PathElement::new(coords, line_style(stroke)))
        .map_err(draw_err)
}

fn draw_label(area: &SvgArea<'_>, label: &Label) -> Result<(), ExportError> {
    let hpos = match label.anchor {
        TextAnchor::Start => HPos::Left,
        TextAnchor::Middle => HPos::Center,
        TextAnchor::End => HPos::Right,
    };
    let mut font = ("sans-serif", label.font_px).into_font();
    if label.rotation_deg <= -45.0 {
        font = font.transform(FontTransform::Rotate270);
    }
    let style = font
        .color(&color(label.color))
        .pos(Pos::new(hpos, VPos::Center));
    area.draw(&Text::new(label.text.clone(), px(label.at), style))
        .map_err(draw_err)
}

fn draw_element(area: &SvgArea<'_>, element: &Element) -> Result<(), ExportError> {
    match element {
        Element::GridLine { from, to, stroke }
        | Element::AxisLine { from, to, stroke }
        | Element::Tick { from, to, stroke } => draw_polyline(area, &[*from, *to], stroke),
        Element::Label(label) => draw_label(area, label),
        Element::Trajectory { points, stroke, .. } | Element::MeanLine { points, stroke } => {
            draw_polyline(area, points, stroke)
        }
        Element::Band { upper, lower, fill } => {
            let outline: Vec<(i32, i32)> = upper
                .iter()
                .chain(lower.iter().rev())
                .copied()
                .map(px)
                .collect();
            let style = ShapeStyle {
                color: color(*fill),
                filled: true,
                stroke_width: 0,
            };
            area.draw(&Polygon::new(outline, style)).map_err(draw_err)
        }
    }
}

/// Render `scene` into an SVG document.
pub fn scene_to_svg(scene: &ChartScene) -> Result<String, ExportError> {
    let mut out = String::new();
    {
        let size = (scene.width().round() as u32, scene.height().round() as u32);
        let root = SVGBackend::with_string(&mut out, size).into_drawing_area();
        root.fill(&color(scene.background())).map_err(draw_err)?;
        for element in scene.elements() {
            draw_element(&root, element)?;
        }
        root.present().map_err(draw_err)?;
    }
    debug!(bytes = out.len(), elements = scene.len(), "scene exported as svg");
    Ok(out)
}

pub fn write_svg(scene: &ChartScene, path: &Path) -> Result<(), ExportError> {
    let svg = scene_to_svg(scene)?;
    std::fs::write(path, svg)?;
    Ok(())
}
