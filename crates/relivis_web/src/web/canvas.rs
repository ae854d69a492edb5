use wasm_bindgen::JsCast;

use relivis::chart::{ChartScene, Element, Label, Point, Stroke, TextAnchor};

use crate::float_fmt::fmt_f64_fixed;

type Ctx = web_sys::CanvasRenderingContext2d;

/// Clear the canvas and paint every scene element in order.
pub(super) fn draw_scene(
    canvas: &web_sys::HtmlCanvasElement,
    scene: &ChartScene,
) -> Result<(), String> {
    let ctx = canvas
        .get_context("2d")
        .map_err(|_| "canvas: get_context threw".to_string())?
        .ok_or("canvas: missing 2d context".to_string())?
        .dyn_into::<Ctx>()
        .map_err(|_| "canvas: context is not 2d".to_string())?;

    let w = canvas.width() as f64;
    let h = canvas.height() as f64;
    ctx.clear_rect(0.0, 0.0, w, h);
    ctx.set_fill_style_str(&scene.background().css());
    ctx.fill_rect(0.0, 0.0, w, h);

    for element in scene.elements() {
        match element {
            Element::GridLine { from, to, stroke }
            | Element::AxisLine { from, to, stroke }
            | Element::Tick { from, to, stroke } => {
                stroke_polyline(&ctx, &[*from, *to], stroke);
            }
            Element::Trajectory { points, stroke, .. } | Element::MeanLine { points, stroke } => {
                stroke_polyline(&ctx, points, stroke);
            }
            Element::Band { upper, lower, fill } => {
                if upper.is_empty() {
                    continue;
                }
                ctx.begin_path();
                ctx.move_to(upper[0].x, upper[0].y);
                for p in upper.iter().skip(1) {
                    ctx.line_to(p.x, p.y);
                }
                for p in lower.iter().rev() {
                    ctx.line_to(p.x, p.y);
                }
                ctx.close_path();
                ctx.set_fill_style_str(&fill.css());
                ctx.fill();
            }
            Element::Label(label) => draw_label(&ctx, label)?,
        }
    }
    Ok(())
}

fn stroke_polyline(ctx: &Ctx, points: &[Point], stroke: &Stroke) {
    let Some(first) = points.first() else {
        return;
    };
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in &points[1..] {
        ctx.line_to(p.x, p.y);
    }
    ctx.set_stroke_style_str(&stroke.color.css());
    ctx.set_line_width(stroke.width);
    ctx.set_line_join("round");
    ctx.stroke();
}

fn draw_label(ctx: &Ctx, label: &Label) -> Result<(), String> {
    ctx.save();
    ctx.translate(label.at.x, label.at.y)
        .map_err(|_| "canvas: translate threw".to_string())?;
    if label.rotation_deg != 0.0 {
        ctx.rotate(label.rotation_deg.to_radians())
            .map_err(|_| "canvas: rotate threw".to_string())?;
    }
    ctx.set_text_align(match label.anchor {
        TextAnchor::Start => "left",
        TextAnchor::Middle => "center",
        TextAnchor::End => "right",
    });
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{}px sans-serif", fmt_f64_fixed(label.font_px, 0)));
    ctx.set_fill_style_str(&label.color.css());
    let drawn = ctx
        .fill_text(&label.text, 0.0, 0.0)
        .map_err(|_| "canvas: fill_text threw".to_string());
    ctx.restore();
    drawn
}
