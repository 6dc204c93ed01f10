//! # sweeplab: Language-Model Parameter Sweeps
//!
//! sweeplab configures, runs and reviews parameter-sweep experiments against
//! a remote experiment backend. A sweep submits one prompt for every
//! `(temperature, top_p)` combination in a range; the backend generates and
//! scores each response, and sweeplab turns the scored responses into
//! chart-ready aggregates.
//!
//! ## Pipeline
//!
//! ```text
//! SweepForm ──validate──> generate_range ──> ExperimentRequest
//!                                                  │
//!                                  ExperimentRunner (HttpBackend)
//!                                                  │
//!                                                  v
//!          Experiment list ──> AnalyticsOptions (filter, cap)
//!                                ├──> aggregate_by_parameter_pair  (scatter)
//!                                ├──> aggregate_trend              (line)
//!                                └──> SummaryStatistics            (tiles)
//! ```
//!
//! The sweep generator and aggregator are pure, synchronous functions; the
//! only asynchronous boundary is the backend client.
//!
//! ## Example Usage
//!
//! ```rust
//! use sweeplab::analytics::{AnalyticsOptions, AnalyticsReport};
//! use sweeplab::experiment::{Experiment, MetricKey};
//! use sweeplab::sweep::SweepForm;
//!
//! let request = SweepForm::new("Summarise this article", "summary-sweep")
//!     .temperature(0.1, 0.5)
//!     .top_p(0.8, 1.0)
//!     .build_request()?;
//! assert_eq!(request.parameter_ranges().combination_count(), 15);
//!
//! // ... submit `request` through an ExperimentRunner, then:
//! let history: Vec<Experiment> = Vec::new();
//! let report = AnalyticsReport::compute(&history, &AnalyticsOptions::for_metric(MetricKey::Overall));
//! assert_eq!(report.summary.parameter_range, "N/A");
//! # Ok::<(), sweeplab::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod analytics;
pub mod client;
pub mod dashboard;
pub mod error;
pub mod experiment;
pub mod export;
pub mod store;
pub mod sweep;

pub use error::{Error, Result};
