//! Sweep form: caller-side validation in front of the generator

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::generator::{
    estimated_value_count, generate_range, DEFAULT_STEP, PARAMETER_MAX, PARAMETER_MIN,
};
use crate::experiment::{ExperimentRequest, ParameterRange};
use crate::{Error, Result};

/// Smallest token budget offered.
pub const MAX_TOKENS_MIN: u32 = 500;

/// Largest token budget offered.
pub const MAX_TOKENS_MAX: u32 = 4000;

/// Token budget increment.
pub const MAX_TOKENS_STEP: u32 = 100;

/// Default token budget.
pub const DEFAULT_MAX_TOKENS: u32 = 500;

/// Ranges narrower than this get a "will generate N value(s)" hint.
const NARROW_RANGE: f64 = 0.3;

/// Slack for the `[0.1, 1.0]` domain check.
const DOMAIN_TOLERANCE: f64 = 1e-9;

/// A user-chosen `[min, max]` pair for one sweep axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepBounds {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl SweepBounds {
    /// Create bounds. Not validated until [`SweepBounds::validate`].
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Whether `min < max`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        self.min < self.max
    }

    /// Reject `min >= max` and values outside `[0.1, 1.0]`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidRange`] naming `parameter`.
    pub fn validate(&self, parameter: &str) -> Result<()> {
        if !self.is_ordered() {
            return Err(Error::invalid_range(
                parameter,
                format!(
                    "min ({}) must be less than max ({})",
                    self.min, self.max
                ),
            ));
        }
        let in_domain =
            |v: f64| (PARAMETER_MIN - DOMAIN_TOLERANCE..=PARAMETER_MAX + DOMAIN_TOLERANCE).contains(&v);
        if !in_domain(self.min) || !in_domain(self.max) {
            return Err(Error::invalid_range(
                parameter,
                format!(
                    "bounds {}..{} must lie within {PARAMETER_MIN}..{PARAMETER_MAX}",
                    self.min, self.max
                ),
            ));
        }
        Ok(())
    }

    /// Run the generator over these bounds. Callers validate first.
    #[must_use]
    pub fn values(&self, step: f64) -> Vec<f64> {
        generate_range(self.min, self.max, step)
    }

    /// Legacy display estimate, see [`estimated_value_count`].
    #[must_use]
    pub fn estimated_value_count(&self, step: f64) -> usize {
        estimated_value_count(self.min, self.max, step)
    }

    /// Hint shown under narrow (but valid) ranges.
    ///
    /// The count comes from the generated values, not the legacy estimate.
    #[must_use]
    pub fn hint(&self, step: f64) -> Option<String> {
        let span = self.max - self.min;
        if !self.is_ordered() || span >= NARROW_RANGE {
            return None;
        }
        Some(format!(
            "Range: {span:.1} - This will generate {} value(s)",
            self.values(step).len()
        ))
    }
}

impl Default for SweepBounds {
    fn default() -> Self {
        Self::new(PARAMETER_MIN, PARAMETER_MAX)
    }
}

/// Everything the user fills in before submitting an experiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepForm {
    /// Prompt sent for every combination
    pub prompt: String,
    /// Experiment name
    pub experiment_name: String,
    /// Temperature bounds
    pub temperature: SweepBounds,
    /// Top-p bounds
    pub top_p: SweepBounds,
    /// Token budget
    pub max_tokens: u32,
    /// Sweep increment for both axes
    pub step: f64,
}

impl Default for SweepForm {
    fn default() -> Self {
        Self {
            prompt: String::new(),
            experiment_name: String::new(),
            temperature: SweepBounds::default(),
            top_p: SweepBounds::default(),
            max_tokens: DEFAULT_MAX_TOKENS,
            step: DEFAULT_STEP,
        }
    }
}

impl SweepForm {
    /// Create a form with default bounds and token budget.
    #[must_use]
    pub fn new(prompt: impl Into<String>, experiment_name: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            experiment_name: experiment_name.into(),
            ..Self::default()
        }
    }

    /// Set temperature bounds.
    #[must_use]
    pub const fn temperature(mut self, min: f64, max: f64) -> Self {
        self.temperature = SweepBounds::new(min, max);
        self
    }

    /// Set top-p bounds.
    #[must_use]
    pub const fn top_p(mut self, min: f64, max: f64) -> Self {
        self.top_p = SweepBounds::new(min, max);
        self
    }

    /// Set the token budget.
    #[must_use]
    pub const fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Whether the form would pass [`SweepForm::validate`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    /// Validate in the order the user sees problems: required fields,
    /// temperature ordering, top-p ordering, token budget, then domain.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] for blank fields or an out-of-range token
    /// budget, [`Error::InvalidRange`] for bad bounds.
    pub fn validate(&self) -> Result<()> {
        if self.prompt.trim().is_empty() || self.experiment_name.trim().is_empty() {
            return Err(Error::InvalidInput(
                "Please fill in all required fields".to_string(),
            ));
        }
        if !self.temperature.is_ordered() {
            return Err(Error::invalid_range(
                "temperature",
                "Temperature min must be less than max",
            ));
        }
        if !self.top_p.is_ordered() {
            return Err(Error::invalid_range("top_p", "Top-p min must be less than max"));
        }
        if !(MAX_TOKENS_MIN..=MAX_TOKENS_MAX).contains(&self.max_tokens) {
            return Err(Error::InvalidInput(format!(
                "max_tokens must be between {MAX_TOKENS_MIN} and {MAX_TOKENS_MAX}, got {}",
                self.max_tokens
            )));
        }
        if !(self.step > 0.0 && self.step.is_finite()) {
            return Err(Error::InvalidInput(format!(
                "step must be positive, got {}",
                self.step
            )));
        }
        self.temperature.validate("temperature")?;
        self.top_p.validate("top_p")?;
        Ok(())
    }

    /// Validate, then expand both axes into an [`ExperimentRequest`].
    ///
    /// # Errors
    ///
    /// Any error from [`SweepForm::validate`]; the generator is never
    /// invoked on invalid bounds.
    pub fn build_request(&self) -> Result<ExperimentRequest> {
        self.validate()?;
        let ranges = ParameterRange {
            temperature_values: self.temperature.values(self.step),
            top_p_values: self.top_p.values(self.step),
            max_tokens: self.max_tokens,
        };
        debug!(
            experiment = %self.experiment_name,
            temperatures = ranges.temperature_values.len(),
            top_ps = ranges.top_p_values.len(),
            "built sweep request"
        );
        Ok(ExperimentRequest::new(
            self.prompt.clone(),
            self.experiment_name.clone(),
            ranges,
        ))
    }

    /// Responses the sweep will request, from the generated sequences.
    /// Zero while either axis is unordered.
    #[must_use]
    pub fn combination_count(&self) -> usize {
        if !self.temperature.is_ordered() || !self.top_p.is_ordered() {
            return 0;
        }
        self.temperature.values(self.step).len() * self.top_p.values(self.step).len()
    }

    /// The legacy `ceil` estimate of [`SweepForm::combination_count`].
    #[must_use]
    pub fn estimated_combination_count(&self) -> usize {
        self.temperature.estimated_value_count(self.step)
            * self.top_p.estimated_value_count(self.step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_form_is_invalid_until_filled() {
        let form = SweepForm::default();
        assert!(matches!(form.validate(), Err(Error::InvalidInput(_))));
        assert!(SweepForm::new("p", "n").is_valid());
    }

    #[test]
    fn test_whitespace_prompt_rejected() {
        let form = SweepForm::new("   ", "name");
        assert!(matches!(form.validate(), Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_temperature_checked_before_top_p() {
        let form = SweepForm::new("p", "n").temperature(0.5, 0.5).top_p(0.9, 0.2);
        match form.validate() {
            Err(Error::InvalidRange { parameter, .. }) => assert_eq!(parameter, "temperature"),
            other => panic!("expected temperature range error, got {other:?}"),
        }
    }

    #[test]
    fn test_max_tokens_bounds() {
        assert!(SweepForm::new("p", "n").max_tokens(4000).is_valid());
        assert!(!SweepForm::new("p", "n").max_tokens(4100).is_valid());
        assert!(!SweepForm::new("p", "n").max_tokens(100).is_valid());
    }

    #[test]
    fn test_out_of_domain_bounds_rejected() {
        let form = SweepForm::new("p", "n").top_p(0.0, 0.5);
        assert!(matches!(form.validate(), Err(Error::InvalidRange { .. })));
    }

    #[test]
    fn test_build_request_expands_axes() {
        let req = SweepForm::new("Write a haiku", "haiku")
            .temperature(0.1, 0.3)
            .top_p(0.8, 1.0)
            .build_request()
            .unwrap();
        assert_eq!(req.parameter_ranges().temperature_values, vec![0.1, 0.2, 0.3]);
        assert_eq!(req.parameter_ranges().top_p_values, vec![0.8, 0.9, 1.0]);
        assert_eq!(req.parameter_ranges().max_tokens, DEFAULT_MAX_TOKENS);
        assert_eq!(req.parameter_ranges().combination_count(), 9);
    }

    #[test]
    fn test_combination_count_from_generated_values() {
        let form = SweepForm::new("p", "n");
        assert_eq!(form.combination_count(), 100);
        // (1.0 - 0.1) / 0.1 evaluates to 9.000000000000002, so ceil overshoots
        assert_eq!(form.estimated_combination_count(), 121);
    }

    #[test]
    fn test_hint_only_for_narrow_valid_ranges() {
        assert_eq!(
            SweepBounds::new(0.1, 0.3).hint(DEFAULT_STEP).as_deref(),
            Some("Range: 0.2 - This will generate 3 value(s)")
        );
        assert!(SweepBounds::new(0.1, 0.5).hint(DEFAULT_STEP).is_none());
        assert!(SweepBounds::new(0.3, 0.1).hint(DEFAULT_STEP).is_none());
    }
}
