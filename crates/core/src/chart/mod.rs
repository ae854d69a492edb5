//! Chart construction: scales, the drawing list, and the renderer that fills it.

pub mod render;
pub mod scale;
pub mod scene;

pub use render::{
    render, subject_color, ChartLayout, DisplayOptions, Margins, SERIES_COLORS, X_TITLE, Y_DOMAIN,
    Y_TITLE,
};
pub use scale::LinearScale;
pub use scene::{ChartScene, Element, ElementKind, Label, Point, Rgba, Stroke, TextAnchor};
