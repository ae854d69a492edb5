//! Trial simulator.
//!
//! Every subject starts from a fixed initial value. Each later trial is an
//! independent perturbation of that initial value: a logistic bias term
//! centered on the trial midpoint plus Gaussian jitter. Nothing accumulates
//! from one trial to the next.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::prng::Prng;

/// Number of subject slots in [`InitialConditions::generate`].
pub const MAX_SUBJECTS: usize = 20;

/// Center of the initial-value distribution.
pub const BASE_VALUE: f64 = 50.0;

/// Standard deviation of the initial-value distribution.
pub const INITIAL_SPREAD: f64 = 5.0;

/// `learning` at which the logistic bias curve goes flat.
pub const STEEPNESS_ORIGIN: f64 = 2.1;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Per-subject starting values, fixed for the lifetime of a chart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct InitialConditions {
    values: Vec<f64>,
}

impl InitialConditions {
    /// [`MAX_SUBJECTS`] draws from Normal([`BASE_VALUE`], [`INITIAL_SPREAD`]).
    pub fn generate(rng: &mut Prng) -> Self {
        Self::sample(MAX_SUBJECTS, BASE_VALUE, INITIAL_SPREAD, rng)
    }

    pub fn sample(capacity: usize, base: f64, spread: f64, rng: &mut Prng) -> Self {
        let values = (0..capacity).map(|_| rng.next_normal(base, spread)).collect();
        Self { values }
    }

    pub fn from_values(values: Vec<f64>) -> Self {
        Self { values }
    }

    pub fn capacity(&self) -> usize {
        self.values.len()
    }

    pub fn get(&self, subject: usize) -> Option<f64> {
        self.values.get(subject).copied()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}

/// Rows are subjects, columns are trials.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(transparent))]
pub struct TrialMatrix {
    rows: Vec<Vec<f64>>,
}

impl TrialMatrix {
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        Self { rows }
    }

    pub fn subject_count(&self) -> usize {
        self.rows.len()
    }

    /// Length of the longest row (all rows are equal for simulator output).
    pub fn trial_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }

    pub fn row(&self, subject: usize) -> Option<&[f64]> {
        self.rows.get(subject).map(Vec::as_slice)
    }

    /// Values of every subject at one trial; short rows are skipped.
    pub fn column(&self, trial: usize) -> Vec<f64> {
        self.rows.iter().filter_map(|r| r.get(trial).copied()).collect()
    }
}

/// Inputs of one simulation run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimParams {
    pub subject_count: usize,
    pub trial_count: usize,
    pub bias: f64,
    pub variation: f64,
    pub learning: f64,
}

/// Logistic bias at `trial` for a run of `trial_count` trials.
///
/// Steepness is `2.1 - learning`; at `learning == 2.1` the curve is flat at `bias / 2`.
#[inline]
pub fn bias_effect(bias: f64, learning: f64, trial: usize, trial_count: usize) -> f64 {
    let midpoint = trial_count as f64 / 2.0;
    let steepness = STEEPNESS_ORIGIN - learning;
    bias / (1.0 + (-steepness * (trial as f64 - midpoint)).exp())
}

/// Simulate `params.subject_count` trajectories of `params.trial_count` trials.
///
/// Noise is drawn from `rng` independently for every (subject, trial) pair.
/// With `variation == 0` the generator is never consulted and the result is
/// fully deterministic.
pub fn generate(
    initial: &InitialConditions,
    params: &SimParams,
    rng: &mut Prng,
) -> Result<TrialMatrix, SimError> {
    if params.subject_count < 1 {
        return Err(SimError::InvalidArgument(
            "subject count must be at least 1".to_string(),
        ));
    }
    if params.trial_count < 1 {
        return Err(SimError::InvalidArgument(
            "trial count must be at least 1".to_string(),
        ));
    }
    if params.subject_count > initial.capacity() {
        return Err(SimError::InvalidArgument(format!(
            "subject count {} exceeds capacity {}",
            params.subject_count,
            initial.capacity()
        )));
    }

    let noisy = params.variation != 0.0;
    let rows = initial.as_slice()[..params.subject_count]
        .iter()
        .map(|&start| {
            let mut row = Vec::with_capacity(params.trial_count);
            row.push(start);
            for trial in 1..params.trial_count {
                let bias = bias_effect(params.bias, params.learning, trial, params.trial_count);
                let jitter = if noisy {
                    rng.next_normal(0.0, params.variation)
                } else {
                    0.0
                };
                row.push(start + bias + jitter);
            }
            row
        })
        .collect();

    debug!(
        subjects = params.subject_count,
        trials = params.trial_count,
        bias = params.bias,
        variation = params.variation,
        learning = params.learning,
        "simulated trial matrix"
    );

    Ok(TrialMatrix { rows })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(subjects: usize, trials: usize) -> SimParams {
        SimParams {
            subject_count: subjects,
            trial_count: trials,
            bias: 10.0,
            variation: 2.0,
            learning: 1.0,
        }
    }

    #[test]
    fn initial_conditions_fill_every_slot() {
        let mut rng = Prng::new(1);
        let ic = InitialConditions::generate(&mut rng);
        assert_eq!(ic.capacity(), MAX_SUBJECTS);
        assert!(ic.as_slice().iter().all(|v| v.is_finite()));
        assert_eq!(ic.get(MAX_SUBJECTS), None);
    }

    #[test]
    fn rejects_out_of_range_counts() {
        let ic = InitialConditions::from_values(vec![50.0; 4]);
        let mut rng = Prng::new(3);

        let err = generate(&ic, &params(0, 3), &mut rng).unwrap_err();
        assert!(matches!(err, SimError::InvalidArgument(_)));
        assert!(generate(&ic, &params(2, 0), &mut rng).is_err());
        assert!(generate(&ic, &params(5, 3), &mut rng).is_err());
        assert!(generate(&ic, &params(4, 3), &mut rng).is_ok());
    }

    #[test]
    fn bias_effect_is_half_bias_at_midpoint() {
        assert!((bias_effect(10.0, 1.0, 5, 10) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn bias_effect_rises_toward_bias_after_midpoint() {
        let early = bias_effect(10.0, 0.1, 1, 10);
        let late = bias_effect(10.0, 0.1, 9, 10);
        assert!(early < 0.01, "early={early}");
        assert!(late > 9.99, "late={late}");
    }

    #[test]
    fn single_trial_is_only_the_initial_value() {
        let ic = InitialConditions::from_values(vec![41.5, 62.0]);
        let mut rng = Prng::new(9);
        let m = generate(&ic, &params(2, 1), &mut rng).unwrap();
        assert_eq!(m.rows(), &[vec![41.5], vec![62.0]]);
    }

    #[test]
    fn noise_changes_with_rng_state() {
        let ic = InitialConditions::from_values(vec![50.0; 3]);
        let mut rng = Prng::new(11);
        let a = generate(&ic, &params(3, 6), &mut rng).unwrap();
        let b = generate(&ic, &params(3, 6), &mut rng).unwrap();
        assert_ne!(a, b);
        assert_eq!(a.column(0), b.column(0));
    }
}
