//! Headless output of rendered scenes.

pub mod svg;

pub use svg::{scene_to_svg, write_svg, ExportError};
