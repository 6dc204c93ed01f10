//! Parameter-pair grouping for scatter charts

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::experiment::{MetricKey, ResponseRecord};

/// Aggregate of every response sharing one `(temperature, top_p)` pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPoint {
    /// Temperature of the group
    pub temperature: f64,
    /// Top-p of the group
    pub top_p: f64,
    /// Merged metric value (pairwise running average)
    pub value: f64,
    /// Number of responses merged into this point
    pub count: usize,
    /// `"{temperature}/{top_p}"` of the first response
    pub label: String,
}

/// Group responses by exact `(temperature, top_p)` and merge the metric.
///
/// Keys compare by bit pattern, with no tolerance or binning. Generated
/// sweeps only emit 1-decimal-rounded values, so equal pairs are
/// bit-identical.
///
/// On a key collision the stored value becomes `(existing + new) / 2`. This
/// is a pairwise running average, not the mean of all N values: for
/// `[a, b, c]` the result is `((a + b) / 2 + c) / 2`. `count` still
/// increments once per merged response.
///
/// Output follows first-occurrence order of each key.
///
/// Every record passed in is aggregated. To apply an experiment selection
/// and the response cap, pass the rows from
/// [`AnalyticsOptions::flatten`](crate::analytics::AnalyticsOptions::flatten)
/// (as [`AnalyticsReport::compute`](crate::analytics::AnalyticsReport::compute) does).
///
/// # Examples
///
/// ```rust
/// use sweeplab::analytics::aggregate_by_parameter_pair;
/// use sweeplab::experiment::{GenerationParameters, MetricKey, MetricVector, ResponseRecord};
///
/// let record = |overall| ResponseRecord::new(
///     "",
///     GenerationParameters::new(0.5, 0.9, 500),
///     MetricVector { overall, ..MetricVector::default() },
/// );
/// let points = aggregate_by_parameter_pair(&[record(0.8), record(0.6)], MetricKey::Overall);
///
/// assert_eq!(points.len(), 1);
/// assert!((points[0].value - 0.7).abs() < 1e-12);
/// assert_eq!(points[0].count, 2);
/// ```
#[must_use]
pub fn aggregate_by_parameter_pair<'a, I>(records: I, metric: MetricKey) -> Vec<CorrelationPoint>
where
    I: IntoIterator<Item = &'a ResponseRecord>,
{
    let mut index: FxHashMap<(u64, u64), usize> = FxHashMap::default();
    let mut points: Vec<CorrelationPoint> = Vec::new();

    for record in records {
        let params = record.parameters;
        let key = (params.temperature.to_bits(), params.top_p.to_bits());
        let value = record.metrics.get(metric);

        if let Some(&slot) = index.get(&key) {
            let point = &mut points[slot];
            point.value = (point.value + value) / 2.0;
            point.count += 1;
        } else {
            index.insert(key, points.len());
            points.push(CorrelationPoint {
                temperature: params.temperature,
                top_p: params.top_p,
                value,
                count: 1,
                label: params.combo_label(),
            });
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::{GenerationParameters, MetricVector};

    fn record(t: f64, p: f64, overall: f64) -> ResponseRecord {
        ResponseRecord::new(
            "",
            GenerationParameters::new(t, p, 500),
            MetricVector {
                overall,
                creativity: overall / 2.0,
                ..MetricVector::default()
            },
        )
    }

    #[test]
    fn test_pairwise_halving_not_true_mean() {
        let records = [record(0.1, 0.1, 0.2), record(0.1, 0.1, 0.4), record(0.1, 0.1, 0.9)];
        let points = aggregate_by_parameter_pair(&records, MetricKey::Overall);
        assert_eq!(points.len(), 1);
        // ((0.2 + 0.4) / 2 + 0.9) / 2 = 0.6, while the true mean is 0.5
        assert!((points[0].value - 0.6).abs() < 1e-12);
        assert_eq!(points[0].count, 3);
    }

    #[test]
    fn test_first_occurrence_order() {
        let records = [
            record(0.9, 0.1, 0.5),
            record(0.1, 0.1, 0.5),
            record(0.9, 0.1, 0.5),
            record(0.5, 0.5, 0.5),
        ];
        let points = aggregate_by_parameter_pair(&records, MetricKey::Overall);
        let keys: Vec<_> = points.iter().map(|p| (p.temperature, p.top_p)).collect();
        assert_eq!(keys, vec![(0.9, 0.1), (0.1, 0.1), (0.5, 0.5)]);
    }

    #[test]
    fn test_selected_metric_is_used() {
        let points = aggregate_by_parameter_pair(&[record(0.2, 0.3, 0.8)], MetricKey::Creativity);
        assert!((points[0].value - 0.4).abs() < 1e-12);
        assert_eq!(points[0].label, "0.2/0.3");
    }

    #[test]
    fn test_near_equal_values_do_not_merge() {
        let records = [record(0.3, 0.1, 0.5), record(0.1 + 0.2, 0.1, 0.5)];
        let points = aggregate_by_parameter_pair(&records, MetricKey::Overall);
        assert_eq!(points.len(), 2);
    }

    #[test]
    fn test_empty_input() {
        let records: Vec<ResponseRecord> = Vec::new();
        let points = aggregate_by_parameter_pair(&records, MetricKey::Overall);
        assert!(points.is_empty());
    }
}
