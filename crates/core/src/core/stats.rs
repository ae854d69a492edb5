//! Per-trial group statistics.
//!
//! Deviation is the *sample* standard deviation (n - 1 denominator). The
//! chart band and every caller of this module share that choice.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::simulator::TrialMatrix;

/// Arithmetic mean of the non-NaN values, or `None` if there are none.
pub fn mean(values: &[f64]) -> Option<f64> {
    let mut count = 0usize;
    let mut sum = 0.0;
    for &v in values.iter().filter(|v| !v.is_nan()) {
        count += 1;
        sum += v;
    }
    (count > 0).then(|| sum / count as f64)
}

/// Sample variance of the non-NaN values, or `None` with fewer than two.
pub fn variance(values: &[f64]) -> Option<f64> {
    // Welford's online update.
    let mut count = 0usize;
    let mut running_mean = 0.0;
    let mut sum_sq = 0.0;
    for &v in values.iter().filter(|v| !v.is_nan()) {
        count += 1;
        let delta = v - running_mean;
        running_mean += delta / count as f64;
        sum_sq += delta * (v - running_mean);
    }
    (count > 1).then(|| (sum_sq / (count - 1) as f64).max(0.0))
}

pub fn deviation(values: &[f64]) -> Option<f64> {
    variance(values).map(f64::sqrt)
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TrialStats {
    pub mean: f64,
    /// Zero when the column has fewer than two values.
    pub sd: f64,
}

impl TrialStats {
    pub fn lower(&self) -> f64 {
        self.mean - self.sd
    }

    pub fn upper(&self) -> f64 {
        self.mean + self.sd
    }
}

/// Mean and deviation across subjects for every trial column.
pub fn trial_stats(matrix: &TrialMatrix) -> Vec<TrialStats> {
    (0..matrix.trial_count())
        .filter_map(|trial| {
            let column = matrix.column(trial);
            let mean = mean(&column)?;
            Some(TrialStats {
                mean,
                sd: deviation(&column).unwrap_or(0.0),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mean_of_empty_is_none() {
        assert_eq!(mean(&[]), None);
        assert_eq!(mean(&[f64::NAN]), None);
    }

    #[test]
    fn mean_is_arithmetic_average() {
        assert_eq!(mean(&[1.0, 2.0, 3.0, 6.0]), Some(3.0));
    }

    #[test]
    fn deviation_uses_sample_denominator() {
        // Sum of squared deviations is 32 over 8 values: 32 / 7.
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        let sd = deviation(&v).unwrap();
        assert!((sd - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn deviation_needs_two_values() {
        assert_eq!(deviation(&[3.0]), None);
        assert_eq!(deviation(&[3.0, 3.0]), Some(0.0));
    }

    #[test]
    fn identical_column_has_zero_deviation() {
        let m = TrialMatrix::from_rows(vec![vec![47.25, 50.0]; 5]);
        let stats = trial_stats(&m);
        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].mean, 47.25);
        assert_eq!(stats[0].sd, 0.0);
        assert_eq!(stats[1].lower(), stats[1].upper());
    }

    #[test]
    fn single_subject_band_collapses() {
        let m = TrialMatrix::from_rows(vec![vec![40.0, 45.0, 60.0]]);
        let stats = trial_stats(&m);
        assert!(stats.iter().all(|s| s.sd == 0.0));
        assert_eq!(stats[2].mean, 60.0);
    }
}
