//! Experiment selection, response capping, and flattening into rows

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::experiment::{Experiment, GenerationParameters, MetricKey, ResponseRecord};

/// Responses kept per experiment when `include_all_responses` is off.
pub const RESPONSE_CAP: usize = 10;

/// User-controlled analytics settings.
///
/// Every change produces a new value; aggregates are recomputed from the
/// experiment list each time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsOptions {
    /// Metric charted and summarized
    pub metric: MetricKey,
    /// Experiment ids to include; empty means all
    pub selection: BTreeSet<String>,
    /// When false, only the first [`RESPONSE_CAP`] responses per experiment count
    pub include_all_responses: bool,
}

impl Default for AnalyticsOptions {
    fn default() -> Self {
        Self {
            metric: MetricKey::Overall,
            selection: BTreeSet::new(),
            include_all_responses: true,
        }
    }
}

impl AnalyticsOptions {
    /// Options for one metric, no filter, all responses.
    #[must_use]
    pub fn for_metric(metric: MetricKey) -> Self {
        Self {
            metric,
            ..Self::default()
        }
    }

    /// Restrict to the given experiment ids.
    #[must_use]
    pub fn with_selection<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selection = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the response cap flag.
    #[must_use]
    pub const fn include_all_responses(mut self, include_all: bool) -> Self {
        self.include_all_responses = include_all;
        self
    }

    /// Add `id` to the selection if absent, remove it if present.
    #[must_use]
    pub fn toggled(mut self, id: &str) -> Self {
        if !self.selection.remove(id) {
            self.selection.insert(id.to_string());
        }
        self
    }

    /// Whether `experiment` passes the selection filter.
    #[must_use]
    pub fn includes(&self, experiment: &Experiment) -> bool {
        self.selection.is_empty() || self.selection.contains(experiment.experiment_id())
    }

    /// The responses of `experiment` that count, after the cap.
    #[must_use]
    pub fn responses_of<'a>(&self, experiment: &'a Experiment) -> &'a [ResponseRecord] {
        let responses = experiment.responses();
        if self.include_all_responses {
            responses
        } else {
            &responses[..responses.len().min(RESPONSE_CAP)]
        }
    }

    /// Selected experiments, in input order.
    pub fn select<'a>(
        &'a self,
        experiments: &'a [Experiment],
    ) -> impl Iterator<Item = &'a Experiment> + 'a {
        experiments.iter().filter(move |e| self.includes(e))
    }

    /// Flatten the selected, capped responses into analytics rows.
    #[must_use]
    pub fn flatten<'a>(&self, experiments: &'a [Experiment]) -> Vec<AnalyticsRow<'a>> {
        experiments
            .iter()
            .filter(|e| self.includes(e))
            .flat_map(|experiment| {
                self.responses_of(experiment)
                    .iter()
                    .enumerate()
                    .map(move |(i, record)| AnalyticsRow {
                        experiment_id: experiment.experiment_id(),
                        experiment_name: experiment.name(),
                        response_index: i + 1,
                        record,
                    })
            })
            .collect()
    }
}

/// One response, tagged with the experiment it came from.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnalyticsRow<'a> {
    /// Owning experiment id
    pub experiment_id: &'a str,
    /// Owning experiment name
    pub experiment_name: &'a str,
    /// 1-based position within the experiment
    pub response_index: usize,
    /// The scored response
    pub record: &'a ResponseRecord,
}

impl AnalyticsRow<'_> {
    /// Generation parameters of the response.
    #[must_use]
    pub const fn parameters(&self) -> GenerationParameters {
        self.record.parameters
    }

    /// Selected metric value.
    #[must_use]
    pub const fn metric(&self, key: MetricKey) -> f64 {
        self.record.metrics.get(key)
    }

    /// Response text length in characters.
    #[must_use]
    pub fn response_length(&self) -> usize {
        self.record.text_len()
    }

    /// `"{temperature}/{top_p}"` label.
    #[must_use]
    pub fn parameter_combo(&self) -> String {
        self.record.parameters.combo_label()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::experiment::MetricVector;

    fn experiment(id: &str, n: usize) -> Experiment {
        let responses = (0..n)
            .map(|i| {
                ResponseRecord::new(
                    format!("r{i}"),
                    GenerationParameters::new(0.1, 0.1, 500),
                    MetricVector::default(),
                )
            })
            .collect();
        Experiment::new(id, id.to_uppercase(), "p", responses)
    }

    #[test]
    fn test_empty_selection_includes_everything() {
        let options = AnalyticsOptions::default();
        let exps = vec![experiment("a", 1), experiment("b", 1)];
        assert_eq!(options.select(&exps).count(), 2);
    }

    #[test]
    fn test_selection_filters_by_id() {
        let options = AnalyticsOptions::default().with_selection(["b"]);
        let exps = vec![experiment("a", 1), experiment("b", 1)];
        let ids: Vec<_> = options.select(&exps).map(Experiment::experiment_id).collect();
        assert_eq!(ids, vec!["b"]);
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let options = AnalyticsOptions::default().toggled("a");
        assert!(options.selection.contains("a"));
        let options = options.toggled("a");
        assert!(options.selection.is_empty());
    }

    #[test]
    fn test_cap_truncates_to_first_ten() {
        let exp = experiment("a", 15);
        let capped = AnalyticsOptions::default().include_all_responses(false);
        let kept = capped.responses_of(&exp);
        assert_eq!(kept.len(), RESPONSE_CAP);
        assert_eq!(kept[9].text, "r9");
        assert_eq!(AnalyticsOptions::default().responses_of(&exp).len(), 15);
    }

    #[test]
    fn test_flatten_indexes_from_one_per_experiment() {
        let exps = vec![experiment("a", 2), experiment("b", 3)];
        let rows = AnalyticsOptions::default().flatten(&exps);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0].response_index, 1);
        assert_eq!(rows[2].experiment_id, "b");
        assert_eq!(rows[2].response_index, 1);
        assert_eq!(rows[2].experiment_name, "B");
        assert_eq!(rows[4].parameter_combo(), "0.1/0.1");
    }
}
