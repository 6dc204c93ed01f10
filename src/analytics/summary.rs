//! Summary tiles and per-metric breakdowns

use serde::{Deserialize, Serialize};

use super::AnalyticsRow;
use crate::experiment::{MetricKey, ResponseRecord};

/// Headline statistics over the selected metric.
///
/// Unlike [`super::TrendPoint`], empty input produces zeros (and `"N/A"`
/// for the range) instead of a no-data marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of values
    pub count: usize,
    /// Arithmetic mean, `0.0` when empty
    pub mean: f64,
    /// Maximum, floored at `0.0`
    pub max: f64,
    /// Minimum, `0.0` when empty
    pub min: f64,
    /// `"{min}-{max}"` of the parameter (one decimal), or `"N/A"`
    pub parameter_range: String,
}

impl SummaryStatistics {
    /// Compute over metric `values` and the matching `parameters`
    /// (temperature in the dashboard).
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn compute(values: &[f64], parameters: &[f64]) -> Self {
        let count = values.len();
        let mean = if count == 0 {
            0.0
        } else {
            values.iter().sum::<f64>() / count as f64
        };
        let max = values.iter().copied().fold(0.0, f64::max);
        let min = values.iter().copied().reduce(f64::min).unwrap_or(0.0);

        let parameter_range = if values.is_empty() || parameters.is_empty() {
            "N/A".to_string()
        } else {
            let lo = parameters.iter().copied().fold(f64::INFINITY, f64::min);
            let hi = parameters.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            format!("{lo:.1}-{hi:.1}")
        };

        Self {
            count,
            mean,
            max,
            min,
            parameter_range,
        }
    }

    /// Compute over flattened rows: metric values, temperature range.
    #[must_use]
    pub fn from_rows(rows: &[AnalyticsRow<'_>], metric: MetricKey) -> Self {
        let values: Vec<f64> = rows.iter().map(|r| r.metric(metric)).collect();
        let temperatures: Vec<f64> = rows.iter().map(|r| r.parameters().temperature).collect();
        Self::compute(&values, &temperatures)
    }
}

impl Default for SummaryStatistics {
    fn default() -> Self {
        Self::compute(&[], &[])
    }
}

/// Average, best and worst of one metric across a set of responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricBreakdown {
    /// Metric described
    pub metric: MetricKey,
    /// Arithmetic mean
    pub average: f64,
    /// Maximum
    pub max: f64,
    /// Minimum
    pub min: f64,
}

impl MetricBreakdown {
    /// One breakdown per metric (display order). Empty input yields an
    /// empty vector.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn for_responses(responses: &[ResponseRecord]) -> Vec<Self> {
        if responses.is_empty() {
            return Vec::new();
        }
        let n = responses.len() as f64;
        MetricKey::ALL
            .iter()
            .map(|&metric| {
                let values = responses.iter().map(|r| r.metrics.get(metric));
                Self {
                    metric,
                    average: values.clone().sum::<f64>() / n,
                    max: values.clone().fold(f64::NEG_INFINITY, f64::max),
                    min: values.fold(f64::INFINITY, f64::min),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{GenerationParameters, MetricVector};

    #[test]
    fn test_empty_summary_defaults() {
        let s = SummaryStatistics::compute(&[], &[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.abs() < f64::EPSILON);
        assert!(s.max.abs() < f64::EPSILON);
        assert_eq!(s.parameter_range, "N/A");
        assert_eq!(s, SummaryStatistics::default());
    }

    #[test]
    fn test_summary_values() {
        let s = SummaryStatistics::compute(&[0.5, 0.9, 0.1], &[0.3, 0.1, 0.7]);
        assert_eq!(s.count, 3);
        assert!((s.mean - 0.5).abs() < 1e-12);
        assert!((s.max - 0.9).abs() < f64::EPSILON);
        assert!((s.min - 0.1).abs() < f64::EPSILON);
        assert_eq!(s.parameter_range, "0.1-0.7");
    }

    #[test]
    fn test_max_is_floored_at_zero() {
        let s = SummaryStatistics::compute(&[-0.5, -0.2], &[0.1, 0.2]);
        assert!(s.max.abs() < f64::EPSILON);
        assert!((s.min + 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_breakdown_covers_all_metrics() {
        let responses = vec![
            ResponseRecord::new(
                "",
                GenerationParameters::new(0.1, 0.1, 500),
                MetricVector {
                    completeness: 0.2,
                    coherence: 0.2,
                    creativity: 0.2,
                    relevance: 0.2,
                    overall: 0.2,
                },
            ),
            ResponseRecord::new(
                "",
                GenerationParameters::new(0.2, 0.1, 500),
                MetricVector {
                    completeness: 0.6,
                    coherence: 0.6,
                    creativity: 0.6,
                    relevance: 0.6,
                    overall: 0.6,
                },
            ),
        ];
        let breakdown = MetricBreakdown::for_responses(&responses);
        assert_eq!(breakdown.len(), 5);
        assert_eq!(breakdown[0].metric, MetricKey::Overall);
        assert!((breakdown[0].average - 0.4).abs() < 1e-12);
        assert!((breakdown[0].max - 0.6).abs() < f64::EPSILON);
        assert!((breakdown[0].min - 0.2).abs() < f64::EPSILON);
        assert!(MetricBreakdown::for_responses(&[]).is_empty());
    }
}
