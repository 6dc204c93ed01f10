//! Experiment Request - one sweep submission sent to the execution backend

use serde::{Deserialize, Serialize};

/// The expanded sweep: every temperature and top-p value to try.
///
/// Both sequences are strictly increasing, 1-decimal values in `[0.1, 1.0]`
/// when built through [`crate::sweep::SweepForm`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterRange {
    /// Temperature values to try
    #[serde(rename = "temperature")]
    pub temperature_values: Vec<f64>,
    /// Top-p values to try
    #[serde(rename = "top_p")]
    pub top_p_values: Vec<f64>,
    /// Token budget shared by every combination
    pub max_tokens: u32,
}

impl ParameterRange {
    /// Number of `(temperature, top_p)` combinations requested.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        self.temperature_values.len() * self.top_p_values.len()
    }

    /// Iterate the cross-product in submission order (temperature-major).
    pub fn combinations(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.temperature_values
            .iter()
            .flat_map(move |&t| self.top_p_values.iter().map(move |&p| (t, p)))
    }
}

/// An experiment submission. Created once per submit and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRequest {
    prompt: String,
    experiment_name: String,
    parameter_ranges: ParameterRange,
}

impl ExperimentRequest {
    /// Create a request. Callers validate the inputs first
    /// (see [`crate::sweep::SweepForm::build_request`]).
    #[must_use]
    pub fn new(
        prompt: impl Into<String>,
        experiment_name: impl Into<String>,
        parameter_ranges: ParameterRange,
    ) -> Self {
        Self {
            prompt: prompt.into(),
            experiment_name: experiment_name.into(),
            parameter_ranges,
        }
    }

    /// Get the prompt.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Get the experiment name.
    #[must_use]
    pub fn experiment_name(&self) -> &str {
        &self.experiment_name
    }

    /// Get the expanded parameter ranges.
    #[must_use]
    pub const fn parameter_ranges(&self) -> &ParameterRange {
        &self.parameter_ranges
    }
}
