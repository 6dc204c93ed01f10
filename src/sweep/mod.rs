//! Sweep generation
//!
//! Turns user-chosen `[min, max]` bounds for temperature and top-p into the
//! deterministic, ordered values submitted in one [`ExperimentRequest`].
//!
//! Validation happens here in the form layer; [`generate_range`] itself
//! assumes valid input.
//!
//! # Example
//!
//! ```rust
//! use sweeplab::sweep::SweepForm;
//!
//! let request = SweepForm::new("Explain recursion", "recursion-sweep")
//!     .temperature(0.2, 0.4)
//!     .top_p(0.9, 1.0)
//!     .build_request()?;
//!
//! assert_eq!(request.parameter_ranges().temperature_values, vec![0.2, 0.3, 0.4]);
//! assert_eq!(request.parameter_ranges().combination_count(), 6);
//! # Ok::<(), sweeplab::Error>(())
//! ```
//!
//! [`ExperimentRequest`]: crate::experiment::ExperimentRequest

mod form;
mod generator;

pub use form::{
    SweepBounds, SweepForm, DEFAULT_MAX_TOKENS, MAX_TOKENS_MAX, MAX_TOKENS_MIN, MAX_TOKENS_STEP,
};
pub use generator::{
    estimated_value_count, generate_range, round_to_tenth, DEFAULT_STEP, PARAMETER_MAX,
    PARAMETER_MIN,
};
