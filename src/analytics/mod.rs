//! Result aggregation
//!
//! Reduces lists of scored responses into chart-ready data:
//!
//! - [`aggregate_by_parameter_pair`]: scatter points per `(temperature, top_p)`
//! - [`aggregate_trend`]: one line-chart point per experiment
//! - [`SummaryStatistics`]: count / mean / best / worst / parameter range
//! - [`MetricBreakdown`]: per-metric average, max and min for one experiment
//!
//! All functions are pure and recompute from the input on every call.
//! [`AnalyticsOptions`] carries the selected metric, the experiment filter
//! (empty = no filter) and the 10-response cap; [`AnalyticsReport::compute`]
//! runs the whole pipeline.
//!
//! # Example
//!
//! ```rust
//! use sweeplab::analytics::{AnalyticsOptions, AnalyticsReport};
//! use sweeplab::experiment::{
//!     Experiment, GenerationParameters, MetricKey, MetricVector, ResponseRecord,
//! };
//!
//! let record = |overall| ResponseRecord::new(
//!     "",
//!     GenerationParameters::new(0.1, 0.1, 500),
//!     MetricVector { overall, ..MetricVector::default() },
//! );
//! let experiments = vec![Experiment::new("e1", "E1", "p", vec![record(0.5), record(0.9)])];
//!
//! let report = AnalyticsReport::compute(&experiments, &AnalyticsOptions::for_metric(MetricKey::Overall));
//! assert_eq!(report.correlation.len(), 1);
//! assert_eq!(report.correlation[0].count, 2);
//! assert!((report.correlation[0].value - 0.7).abs() < 1e-12);
//! assert_eq!(report.summary.count, 2);
//! ```

mod correlation;
mod report;
mod selection;
mod summary;
mod trend;

pub use correlation::{aggregate_by_parameter_pair, CorrelationPoint};
pub use report::AnalyticsReport;
pub use selection::{AnalyticsOptions, AnalyticsRow, RESPONSE_CAP};
pub use summary::{MetricBreakdown, SummaryStatistics};
pub use trend::{aggregate_trend, TrendPoint};
