//! Experiment Record - a completed sweep with its scored responses

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ResponseRecord;
use crate::Error;

/// A completed experiment as returned by the backend.
///
/// `response_count` is expected to equal `responses.len()`. The aggregator
/// relies on that but nothing here enforces it; use
/// [`Experiment::response_count_matches`] to check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ExperimentWire")]
pub struct Experiment {
    experiment_id: String,
    name: String,
    prompt: String,
    created_at: DateTime<Utc>,
    responses: Vec<ResponseRecord>,
    response_count: usize,
}

impl Experiment {
    /// Create an experiment with the current timestamp.
    #[must_use]
    pub fn new(
        experiment_id: impl Into<String>,
        name: impl Into<String>,
        prompt: impl Into<String>,
        responses: Vec<ResponseRecord>,
    ) -> Self {
        ExperimentBuilder::new(experiment_id, name)
            .prompt(prompt)
            .responses(responses)
            .build()
    }

    /// Create a builder for constructing an experiment with optional fields.
    #[must_use]
    pub fn builder(experiment_id: impl Into<String>, name: impl Into<String>) -> ExperimentBuilder {
        ExperimentBuilder::new(experiment_id, name)
    }

    /// Get the experiment ID.
    #[must_use]
    pub fn experiment_id(&self) -> &str {
        &self.experiment_id
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the prompt the sweep ran against.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Get the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Calendar date of creation (trend-chart label).
    #[must_use]
    pub fn created_date(&self) -> NaiveDate {
        self.created_at.date_naive()
    }

    /// Get the responses in backend order.
    #[must_use]
    pub fn responses(&self) -> &[ResponseRecord] {
        &self.responses
    }

    /// Response count as reported by the backend.
    #[must_use]
    pub const fn response_count(&self) -> usize {
        self.response_count
    }

    /// Whether the reported count agrees with the actual responses.
    #[must_use]
    pub fn response_count_matches(&self) -> bool {
        self.response_count == self.responses.len()
    }

    /// Highest overall score, `None` without responses.
    #[must_use]
    pub fn best_overall(&self) -> Option<f64> {
        self.responses
            .iter()
            .map(|r| r.metrics.overall)
            .reduce(f64::max)
    }

    /// Lowest overall score, `None` without responses.
    #[must_use]
    pub fn worst_overall(&self) -> Option<f64> {
        self.responses
            .iter()
            .map(|r| r.metrics.overall)
            .reduce(f64::min)
    }
}

/// Builder for `Experiment`.
#[derive(Debug)]
pub struct ExperimentBuilder {
    experiment_id: String,
    name: String,
    prompt: String,
    created_at: DateTime<Utc>,
    responses: Vec<ResponseRecord>,
    response_count: Option<usize>,
}

impl ExperimentBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub fn new(experiment_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            experiment_id: experiment_id.into(),
            name: name.into(),
            prompt: String::new(),
            created_at: Utc::now(),
            responses: Vec::new(),
            response_count: None,
        }
    }

    /// Set the prompt.
    #[must_use]
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Set the responses.
    #[must_use]
    pub fn responses(mut self, responses: Vec<ResponseRecord>) -> Self {
        self.responses = responses;
        self
    }

    /// Append one response.
    #[must_use]
    pub fn response(mut self, response: ResponseRecord) -> Self {
        self.responses.push(response);
        self
    }

    /// Override the reported response count (defaults to `responses.len()`).
    #[must_use]
    pub const fn response_count(mut self, count: usize) -> Self {
        self.response_count = Some(count);
        self
    }

    /// Set a custom creation timestamp (useful for deserialization/testing).
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Build the `Experiment`.
    #[must_use]
    pub fn build(self) -> Experiment {
        let response_count = self.response_count.unwrap_or(self.responses.len());
        Experiment {
            experiment_id: self.experiment_id,
            name: self.name,
            prompt: self.prompt,
            created_at: self.created_at,
            responses: self.responses,
            response_count,
        }
    }
}

/// Backend JSON shape. Older backends send `id` (string or number) instead
/// of `experiment_id`, and may send naive timestamps without an offset.
#[derive(Deserialize)]
struct ExperimentWire {
    #[serde(default)]
    experiment_id: Option<serde_json::Value>,
    #[serde(default)]
    id: Option<serde_json::Value>,
    name: String,
    #[serde(default)]
    prompt: String,
    #[serde(default)]
    responses: Vec<ResponseRecord>,
    #[serde(default)]
    response_count: Option<usize>,
    created_at: String,
}

impl TryFrom<ExperimentWire> for Experiment {
    type Error = Error;

    fn try_from(wire: ExperimentWire) -> Result<Self, Self::Error> {
        let experiment_id = wire
            .experiment_id
            .or(wire.id)
            .map(id_to_string)
            .unwrap_or_default();
        let created_at = parse_timestamp(&wire.created_at)?;

        let mut builder = ExperimentBuilder::new(experiment_id, wire.name)
            .prompt(wire.prompt)
            .responses(wire.responses)
            .created_at(created_at);
        if let Some(count) = wire.response_count {
            builder = builder.response_count(count);
        }
        Ok(builder.build())
    }
}

fn id_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s,
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Parse RFC 3339, falling back to a naive ISO timestamp taken as UTC.
fn parse_timestamp(raw: &str) -> crate::Result<DateTime<Utc>> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
        .map(|naive| naive.and_utc())
        .map_err(|e| Error::InvalidInput(format!("invalid created_at '{raw}': {e}")))
}
