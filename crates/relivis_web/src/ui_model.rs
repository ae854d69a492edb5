//! UI models and metadata that should be available on both wasm and native.
//!
//! Keeping these out of the wasm-only `web` module allows us to unit-test the
//! control inventory and input handling on the host.

use relivis::controls::{spec_for, ControlKey, ControlSpec, ControlState};

use crate::float_fmt::fmt_f64_fixed;

pub fn slider_id(key: ControlKey) -> String {
    format!("{}-slider", key.label())
}

/// Element id of the numeric readout next to a slider.
pub fn readout_id(key: ControlKey) -> String {
    format!("{}-value", slider_id(key))
}

pub fn readout_text(spec: &ControlSpec, value: f64) -> String {
    fmt_f64_fixed(value, spec.decimals())
}

/// Raw `value` attribute for a slider, formatted to the slider step.
pub fn slider_value(state: &ControlState, key: ControlKey) -> String {
    readout_text(&spec_for(key), state.get(key))
}

/// Apply a slider's raw input text. Returns `false` (state untouched) if it
/// does not parse.
pub fn apply_slider_input(state: &mut ControlState, key: ControlKey, raw: &str) -> bool {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => {
            state.set(key, v);
            true
        }
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Show,
    Hide,
}

impl Visibility {
    pub fn value(self) -> &'static str {
        match self {
            Visibility::Show => "show",
            Visibility::Hide => "hide",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Visibility::Show => "Show",
            Visibility::Hide => "Hide",
        }
    }

    pub fn parse(v: &str) -> Option<Self> {
        match v.trim().to_ascii_lowercase().as_str() {
            "show" => Some(Visibility::Show),
            "hide" => Some(Visibility::Hide),
            _ => None,
        }
    }

    pub fn is_shown(self) -> bool {
        self == Visibility::Show
    }

    pub fn all() -> &'static [Visibility] {
        &[Visibility::Show, Visibility::Hide]
    }
}

/// The two show/hide radio groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleGroup {
    IndividualPaths,
    GroupAverage,
}

impl ToggleGroup {
    /// Radio `name` shared by the group's inputs.
    pub fn name(self) -> &'static str {
        match self {
            ToggleGroup::IndividualPaths => "individual-paths",
            ToggleGroup::GroupAverage => "group-average",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ToggleGroup::IndividualPaths => "Individual Paths",
            ToggleGroup::GroupAverage => "Group Average",
        }
    }

    pub fn all() -> &'static [ToggleGroup] {
        &[ToggleGroup::IndividualPaths, ToggleGroup::GroupAverage]
    }

    pub fn is_shown(self, state: &ControlState) -> bool {
        match self {
            ToggleGroup::IndividualPaths => state.show_individual_paths,
            ToggleGroup::GroupAverage => state.show_group_average,
        }
    }

    pub fn set(self, state: &mut ControlState, shown: bool) {
        match self {
            ToggleGroup::IndividualPaths => state.show_individual_paths = shown,
            ToggleGroup::GroupAverage => state.show_group_average = shown,
        }
    }

    pub fn apply_input(self, state: &mut ControlState, raw: &str) -> bool {
        match Visibility::parse(raw) {
            Some(v) => {
                self.set(state, v.is_shown());
                true
            }
            None => false,
        }
    }
}
