//! One-shot analytics pass producing every chart-ready array

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{
    aggregate_by_parameter_pair, AnalyticsOptions, CorrelationPoint, SummaryStatistics, TrendPoint,
};
use crate::experiment::{Experiment, MetricKey};

/// Everything the analytics view renders for one set of options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsReport {
    /// Metric the report was computed for
    pub metric: MetricKey,
    /// Flattened responses after selection and cap
    pub total_responses: usize,
    /// Scatter points keyed by parameter pair
    pub correlation: Vec<CorrelationPoint>,
    /// One line-chart point per selected experiment
    pub trend: Vec<TrendPoint>,
    /// Summary tiles
    pub summary: SummaryStatistics,
}

impl AnalyticsReport {
    /// Run selection, capping, flattening and all three aggregations.
    ///
    /// The cap is applied before any metric is read, so correlation, trend
    /// and summary all see the same capped responses.
    #[must_use]
    pub fn compute(experiments: &[Experiment], options: &AnalyticsOptions) -> Self {
        let rows = options.flatten(experiments);
        let correlation =
            aggregate_by_parameter_pair(rows.iter().map(|row| row.record), options.metric);
        let trend = options
            .select(experiments)
            .map(|e| TrendPoint::from_responses(e, options.responses_of(e), options.metric))
            .collect();
        let summary = SummaryStatistics::from_rows(&rows, options.metric);

        debug!(
            metric = %options.metric,
            rows = rows.len(),
            points = correlation.len(),
            "computed analytics report"
        );

        Self {
            metric: options.metric,
            total_responses: rows.len(),
            correlation,
            trend,
            summary,
        }
    }
}
