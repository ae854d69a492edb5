//! # relivis
//!
//! Simulated trial trajectories and the line chart that shows them.
//!
//! ## Quick Start
//!
//! ```
//! use relivis::prelude::*;
//!
//! let mut chart = TrialChart::with_seed(42);
//! let controls = ControlState::default();
//!
//! let frame = chart.update(&controls).unwrap();
//! assert_eq!(frame.matrix.subject_count(), controls.subject_count);
//! assert_eq!(frame.matrix.trial_count(), controls.trial_count);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): serialization of controls, matrices and stats
//! - `svg` (default): headless SVG export via plotters
//! - `cli`: the `relivis-cli` binary
//!
//! ## Modules
//!
//! - [`simulator`]: initial conditions and trial generation
//! - [`stats`]: per-trial mean and deviation
//! - [`chart`]: scales, scene model and renderer
//! - [`controls`]: control schema and snapshots

#[path = "core/prng.rs"]
pub mod prng;

#[path = "core/simulator.rs"]
pub mod simulator;

#[path = "core/stats.rs"]
pub mod stats;

pub mod app;
pub mod chart;
pub mod controls;

#[cfg(feature = "svg")]
pub mod export;

/// Prelude module for convenient imports.
///
/// ```
/// use relivis::prelude::*;
/// ```
pub mod prelude {
    pub use crate::app::{ChartFrame, TrialChart};
    pub use crate::chart::{render, ChartLayout, ChartScene, DisplayOptions, Element, ElementKind};
    pub use crate::controls::{control_specs, ControlKey, ControlSpec, ControlState};
    pub use crate::prng::Prng;
    pub use crate::simulator::{generate, InitialConditions, SimError, SimParams, TrialMatrix};
    pub use crate::stats::{trial_stats, TrialStats};
}
