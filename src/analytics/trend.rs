//! Per-experiment trend points for line charts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::experiment::{Experiment, MetricKey, ResponseRecord};

/// One experiment's mean of the selected metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// Experiment id
    pub experiment_id: String,
    /// Experiment name (x-axis label)
    pub name: String,
    /// Creation date
    pub date: NaiveDate,
    /// Mean metric value; `None` marks an experiment with no responses
    pub value: Option<f64>,
    /// Responses averaged
    pub response_count: usize,
}

impl TrendPoint {
    /// Build a point over an explicit response slice (e.g. a capped one).
    #[must_use]
    pub fn from_responses(
        experiment: &Experiment,
        responses: &[ResponseRecord],
        metric: MetricKey,
    ) -> Self {
        Self {
            experiment_id: experiment.experiment_id().to_string(),
            name: experiment.name().to_string(),
            date: experiment.created_date(),
            value: mean_metric(responses, metric),
            response_count: responses.len(),
        }
    }

    /// Whether this point has a value to plot.
    #[must_use]
    pub const fn has_data(&self) -> bool {
        self.value.is_some()
    }
}

/// One trend point per experiment, in input order.
///
/// Each value is the arithmetic mean of `metric` over all of that
/// experiment's responses. An experiment without responses yields
/// `value: None` rather than `0.0`, so "no data" stays distinct from a
/// score of zero.
///
/// No selection is applied here: filter first with
/// [`AnalyticsOptions::select`](crate::analytics::AnalyticsOptions::select).
#[must_use]
pub fn aggregate_trend<'a, I>(experiments: I, metric: MetricKey) -> Vec<TrendPoint>
where
    I: IntoIterator<Item = &'a Experiment>,
{
    experiments
        .into_iter()
        .map(|e| TrendPoint::from_responses(e, e.responses(), metric))
        .collect()
}

#[allow(clippy::cast_precision_loss)]
fn mean_metric(responses: &[ResponseRecord], metric: MetricKey) -> Option<f64> {
    if responses.is_empty() {
        return None;
    }
    let sum: f64 = responses.iter().map(|r| r.metrics.get(metric)).sum();
    Some(sum / responses.len() as f64)
}
