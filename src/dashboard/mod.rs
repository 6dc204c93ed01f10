//! Dashboard view-model
//!
//! UI state is a plain value: [`DashboardState::update`] consumes the
//! current state and an [`Action`] and returns the next one. Aggregates are
//! derived on demand from the experiment list, never cached in the state.
//!
//! ```rust
//! use sweeplab::dashboard::{Action, DashboardState, Tab};
//! use sweeplab::experiment::{Experiment, MetricKey};
//!
//! let state = DashboardState::new()
//!     .update(Action::ExperimentCompleted(Experiment::new("e1", "E1", "p", Vec::new())))
//!     .update(Action::SelectMetric(MetricKey::Creativity));
//!
//! assert_eq!(state.active_tab, Tab::History);
//! assert_eq!(state.analytics.metric, MetricKey::Creativity);
//! assert_eq!(state.analytics_report().trend[0].value, None);
//! ```

mod failure;
mod history;
mod state;

pub use failure::FailureKind;
pub use history::{
    page_slice, page_window, sort_responses, total_pages, HistoryView, PAGE_WINDOW,
    RESPONSES_PER_PAGE,
};
pub use state::{Action, DashboardState, Tab};
