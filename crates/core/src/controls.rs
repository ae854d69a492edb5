//! Control schema and the control-state snapshot read on every update.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chart::DisplayOptions;
use crate::simulator::{SimParams, MAX_SUBJECTS};

/// Upper bound of the trial-count slider.
pub const MAX_TRIALS: usize = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Trials,
    Subjects,
    Bias,
    Variation,
    Learning,
}

impl ControlKey {
    pub fn label(self) -> &'static str {
        match self {
            ControlKey::Trials => "trials",
            ControlKey::Subjects => "subjects",
            ControlKey::Bias => "bias",
            ControlKey::Variation => "variation",
            ControlKey::Learning => "learning",
        }
    }

    pub fn all() -> &'static [ControlKey] {
        &[
            ControlKey::Trials,
            ControlKey::Subjects,
            ControlKey::Bias,
            ControlKey::Variation,
            ControlKey::Learning,
        ]
    }

    /// Count controls take whole numbers only.
    pub fn is_count(self) -> bool {
        matches!(self, ControlKey::Trials | ControlKey::Subjects)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ControlSpec {
    pub key: ControlKey,
    pub label: &'static str,
    pub description: &'static str,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl ControlSpec {
    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }

    pub fn clamp(&self, v: f64) -> f64 {
        if v.is_nan() {
            return self.default;
        }
        v.clamp(self.min, self.max)
    }

    /// Fixed decimals for readouts of this control.
    pub fn decimals(&self) -> usize {
        decimals_for_step(self.step)
    }
}

pub fn decimals_for_step(step: f64) -> usize {
    if step >= 1.0 {
        0
    } else if step >= 0.1 {
        1
    } else if step >= 0.01 {
        2
    } else if step >= 0.001 {
        3
    } else {
        4
    }
}

pub fn spec_for(key: ControlKey) -> ControlSpec {
    match key {
        ControlKey::Trials => ControlSpec {
            key,
            label: "Number of Trials",
            description: "Trials per subject; the x axis spans one slot per trial.",
            min: 1.0,
            max: MAX_TRIALS as f64,
            step: 1.0,
            default: 10.0,
        },
        ControlKey::Subjects => ControlSpec {
            key,
            label: "Number of Subjects",
            description: "Simulated subjects, each with its own fixed starting value.",
            min: 1.0,
            max: MAX_SUBJECTS as f64,
            step: 1.0,
            default: 10.0,
        },
        ControlKey::Bias => ControlSpec {
            key,
            label: "Bias",
            description: "Height of the systematic shift reached after the logistic transition.",
            min: -20.0,
            max: 20.0,
            step: 0.5,
            default: 10.0,
        },
        ControlKey::Variation => ControlSpec {
            key,
            label: "Variation",
            description: "Standard deviation of the per-trial noise.",
            min: 0.0,
            max: 10.0,
            step: 0.1,
            default: 2.0,
        },
        ControlKey::Learning => ControlSpec {
            key,
            label: "Learning",
            description: "Shapes the transition; near 2.1 the curve goes flat.",
            min: 0.0,
            max: 2.0,
            step: 0.05,
            default: 1.0,
        },
    }
}

/// Specs in slider order.
pub fn control_specs() -> Vec<ControlSpec> {
    ControlKey::all().iter().copied().map(spec_for).collect()
}

#[derive(Debug, Error)]
pub enum ControlError {
    #[error("{key} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        key: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },
    #[error("{key} is not a finite number")]
    NotFinite { key: &'static str },
    #[cfg(feature = "serde")]
    #[error("control config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Snapshot of every control.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct ControlState {
    pub trial_count: usize,
    pub subject_count: usize,
    pub bias: f64,
    pub variation: f64,
    pub learning: f64,
    pub show_group_average: bool,
    pub show_individual_paths: bool,
}

impl Default for ControlState {
    fn default() -> Self {
        let mut state = Self {
            trial_count: 1,
            subject_count: 1,
            bias: 0.0,
            variation: 0.0,
            learning: 0.0,
            show_group_average: true,
            show_individual_paths: true,
        };
        for spec in control_specs() {
            state.set(spec.key, spec.default);
        }
        state
    }
}

impl ControlState {
    pub fn get(&self, key: ControlKey) -> f64 {
        match key {
            ControlKey::Trials => self.trial_count as f64,
            ControlKey::Subjects => self.subject_count as f64,
            ControlKey::Bias => self.bias,
            ControlKey::Variation => self.variation,
            ControlKey::Learning => self.learning,
        }
    }

    /// Store a raw slider value; counts are rounded and floored at zero.
    pub fn set(&mut self, key: ControlKey, value: f64) {
        let count = || {
            if value.is_finite() {
                value.round().max(0.0) as usize
            } else {
                0
            }
        };
        match key {
            ControlKey::Trials => self.trial_count = count(),
            ControlKey::Subjects => self.subject_count = count(),
            ControlKey::Bias => self.bias = value,
            ControlKey::Variation => self.variation = value,
            ControlKey::Learning => self.learning = value,
        }
    }

    pub fn sim_params(&self) -> SimParams {
        SimParams {
            subject_count: self.subject_count,
            trial_count: self.trial_count,
            bias: self.bias,
            variation: self.variation,
            learning: self.learning,
        }
    }

    pub fn display(&self) -> DisplayOptions {
        DisplayOptions {
            show_group_average: self.show_group_average,
            show_individual_paths: self.show_individual_paths,
        }
    }

    /// Check every numeric control against its slider bounds.
    pub fn validate(&self) -> Result<(), ControlError> {
        for spec in control_specs() {
            let value = self.get(spec.key);
            if !value.is_finite() {
                return Err(ControlError::NotFinite {
                    key: spec.key.label(),
                });
            }
            if !spec.contains(value) {
                return Err(ControlError::OutOfRange {
                    key: spec.key.label(),
                    value,
                    min: spec.min,
                    max: spec.max,
                });
            }
        }
        Ok(())
    }

    /// Pull every numeric control into its slider bounds.
    pub fn clamped(mut self) -> Self {
        for spec in control_specs() {
            let v = spec.clamp(self.get(spec.key));
            self.set(spec.key, v);
        }
        self
    }

    #[cfg(feature = "serde")]
    pub fn from_json_str(s: &str) -> Result<Self, ControlError> {
        Ok(serde_json::from_str(s)?)
    }
}
