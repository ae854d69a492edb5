//! Top-level chart state: fixed initial conditions plus the noise source.

use tracing::info;

use crate::chart::{render, ChartLayout, ChartScene};
use crate::controls::ControlState;
use crate::prng::Prng;
use crate::simulator::{generate, InitialConditions, SimError, TrialMatrix};

/// Output of one update cycle.
#[derive(Debug, Clone)]
pub struct ChartFrame {
    pub matrix: TrialMatrix,
    pub scene: ChartScene,
}

/// Owns everything that must outlive a single redraw.
///
/// Initial conditions are drawn once at construction and never change;
/// every [`TrialChart::update`] resimulates and rebuilds the whole scene.
#[derive(Debug, Clone)]
pub struct TrialChart {
    initial: InitialConditions,
    rng: Prng,
    layout: ChartLayout,
}

impl TrialChart {
    pub fn with_seed(seed: u64) -> Self {
        let mut rng = Prng::new(seed);
        let initial = InitialConditions::generate(&mut rng);
        info!(seed, subjects = initial.capacity(), "initial conditions drawn");
        Self {
            initial,
            rng,
            layout: ChartLayout::default(),
        }
    }

    pub fn from_parts(initial: InitialConditions, rng: Prng, layout: ChartLayout) -> Self {
        Self {
            initial,
            rng,
            layout,
        }
    }

    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn initial_conditions(&self) -> &InitialConditions {
        &self.initial
    }

    pub fn layout(&self) -> &ChartLayout {
        &self.layout
    }

    pub fn simulate(&mut self, controls: &ControlState) -> Result<TrialMatrix, SimError> {
        generate(&self.initial, &controls.sim_params(), &mut self.rng)
    }

    /// Read controls, simulate, render. All-or-nothing.
    pub fn update(&mut self, controls: &ControlState) -> Result<ChartFrame, SimError> {
        let matrix = self.simulate(controls)?;
        let scene = render(&matrix, controls, &self.layout);
        Ok(ChartFrame { matrix, scene })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_conditions_survive_updates() {
        let mut chart = TrialChart::with_seed(5);
        let before = chart.initial_conditions().clone();
        let controls = ControlState::default();
        let a = chart.update(&controls).unwrap();
        let b = chart.update(&controls).unwrap();
        assert_eq!(chart.initial_conditions(), &before);
        assert_eq!(a.matrix.column(0), b.matrix.column(0));
        assert_ne!(a.matrix, b.matrix);
    }

    #[test]
    fn failed_update_reports_invalid_argument() {
        let mut chart = TrialChart::with_seed(5);
        let controls = ControlState {
            trial_count: 0,
            ..ControlState::default()
        };
        assert!(matches!(
            chart.update(&controls),
            Err(SimError::InvalidArgument(_))
        ));
    }

    #[test]
    fn same_seed_reproduces_frames() {
        let controls = ControlState::default();
        let a = TrialChart::with_seed(42).update(&controls).unwrap();
        let b = TrialChart::with_seed(42).update(&controls).unwrap();
        assert_eq!(a.matrix, b.matrix);
        assert_eq!(a.scene, b.scene);
    }
}
