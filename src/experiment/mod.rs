//! Experiment data model
//!
//! Everything the execution backend sends and receives, plus the closed set
//! of quality metrics the analytics select from.
//!
//! ## Schema Overview
//!
//! ```text
//! ExperimentRequest ──(backend)──> Experiment (1) ──< ResponseRecord (N)
//!                                                        ├── GenerationParameters
//!                                                        └── MetricVector [5 scores]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use sweeplab::experiment::{
//!     Experiment, GenerationParameters, MetricKey, MetricVector, ResponseRecord,
//! };
//!
//! let response = ResponseRecord::new(
//!     "Roses are red",
//!     GenerationParameters::new(0.5, 0.9, 500),
//!     MetricVector { overall: 0.8, ..MetricVector::default() },
//! );
//! let experiment = Experiment::new("exp-001", "Poetry sweep", "Write a poem", vec![response]);
//!
//! assert_eq!(experiment.response_count(), 1);
//! assert_eq!(experiment.responses()[0].metrics.get(MetricKey::Overall), 0.8);
//! ```

mod experiment_record;
mod metrics;
mod performance;
mod request;
mod response_record;

pub use experiment_record::{Experiment, ExperimentBuilder};
pub use metrics::{MetricKey, MetricVector, ScoreBand};
pub use performance::PerformanceMetrics;
pub use request::{ExperimentRequest, ParameterRange};
pub use response_record::{GenerationParameters, ResponseRecord};
