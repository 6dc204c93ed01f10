//! Dashboard view-model: immutable state plus a pure update function

use serde::{Deserialize, Serialize};

use super::history::{total_pages, HistoryView};
use crate::analytics::{AnalyticsOptions, AnalyticsReport};
use crate::experiment::{Experiment, MetricKey};

/// Top-level dashboard tab.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tab {
    /// New-experiment form
    #[default]
    New,
    /// Experiment history
    History,
    /// Cross-experiment analytics
    Analytics,
}

/// A user interaction or backend event.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Switch tab
    SelectTab(Tab),
    /// A submitted sweep finished
    ExperimentCompleted(Experiment),
    /// History list (re)loaded from the store
    ExperimentsLoaded(Vec<Experiment>),
    /// An experiment was deleted from the store
    ExperimentDeleted(String),
    /// Open an experiment in the history detail view
    SelectExperiment(String),
    /// Go to a history page
    ChangePage(usize),
    /// Expand/collapse a response card by global index
    ToggleResponse(usize),
    /// Change the analytics metric
    SelectMetric(MetricKey),
    /// Add/remove an experiment from the analytics filter
    ToggleExperimentFilter(String),
    /// Toggle the 10-response cap
    SetIncludeAllResponses(bool),
}

/// Complete dashboard state. Each [`Action`] yields a new value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Visible tab
    pub active_tab: Tab,
    /// Last experiment run from this session
    pub current_experiment: Option<Experiment>,
    /// Experiments known to the dashboard, newest first
    pub experiments: Vec<Experiment>,
    /// History tab state
    pub history: HistoryView,
    /// Analytics tab settings
    pub analytics: AnalyticsOptions,
}

impl DashboardState {
    /// Fresh state on the New tab.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply `action`, returning the next state.
    #[must_use]
    pub fn update(self, action: Action) -> Self {
        match action {
            Action::SelectTab(tab) => Self {
                active_tab: tab,
                ..self
            },
            Action::ExperimentCompleted(experiment) => {
                let mut experiments = self.experiments;
                experiments.retain(|e| e.experiment_id() != experiment.experiment_id());
                experiments.insert(0, experiment.clone());
                Self {
                    active_tab: Tab::History,
                    current_experiment: Some(experiment),
                    experiments,
                    ..self
                }
            }
            Action::ExperimentsLoaded(experiments) => {
                let still_listed = self
                    .history
                    .selected
                    .as_deref()
                    .map_or(true, |id| experiments.iter().any(|e| e.experiment_id() == id));
                let history = if still_listed {
                    self.history
                } else {
                    HistoryView::default()
                };
                let mut analytics = self.analytics;
                analytics
                    .selection
                    .retain(|id| experiments.iter().any(|e| e.experiment_id() == id));
                Self {
                    experiments,
                    history,
                    analytics,
                    ..self
                }
            }
            Action::ExperimentDeleted(id) => {
                let mut experiments = self.experiments;
                experiments.retain(|e| e.experiment_id() != id);
                let history = if self.history.selected.as_deref() == Some(id.as_str()) {
                    HistoryView::default()
                } else {
                    self.history
                };
                let current_experiment = self
                    .current_experiment
                    .filter(|e| e.experiment_id() != id);
                let mut analytics = self.analytics;
                analytics.selection.remove(&id);
                Self {
                    experiments,
                    history,
                    current_experiment,
                    analytics,
                    ..self
                }
            }
            Action::SelectExperiment(id) => Self {
                history: HistoryView::select(id),
                ..self
            },
            Action::ChangePage(page) => {
                let total = self
                    .selected_experiment()
                    .map_or(0, |e| total_pages(e.responses().len()));
                Self {
                    history: self.history.with_page(page, total),
                    ..self
                }
            }
            Action::ToggleResponse(index) => Self {
                history: self.history.toggled(index),
                ..self
            },
            Action::SelectMetric(metric) => Self {
                analytics: AnalyticsOptions {
                    metric,
                    ..self.analytics
                },
                ..self
            },
            Action::ToggleExperimentFilter(id) => Self {
                analytics: self.analytics.toggled(&id),
                ..self
            },
            Action::SetIncludeAllResponses(include_all) => Self {
                analytics: self.analytics.include_all_responses(include_all),
                ..self
            },
        }
    }

    /// The experiment open in the history detail view.
    #[must_use]
    pub fn selected_experiment(&self) -> Option<&Experiment> {
        let id = self.history.selected.as_deref()?;
        self.experiments.iter().find(|e| e.experiment_id() == id)
    }

    /// Analytics for the current options.
    #[must_use]
    pub fn analytics_report(&self) -> AnalyticsReport {
        AnalyticsReport::compute(&self.experiments, &self.analytics)
    }
}
