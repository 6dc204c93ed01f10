//! Experiment backend client
//!
//! [`ClientConfig`] is always available; [`HttpBackend`] needs the `client`
//! feature (on by default).
//!
//! ```rust,no_run
//! use sweeplab::client::{ClientConfig, HttpBackend};
//! use sweeplab::store::{ExperimentRunner, ExperimentStore};
//! use sweeplab::sweep::SweepForm;
//!
//! # async fn example() -> sweeplab::Result<()> {
//! let backend = HttpBackend::new(&ClientConfig::from_env()?)?;
//!
//! let request = SweepForm::new("Explain TCP", "tcp-sweep").build_request()?;
//! let experiment = backend.create_experiment(&request).await?;
//! println!("{} responses", experiment.responses().len());
//!
//! let history = backend.list_experiments().await?;
//! println!("{} experiments stored", history.len());
//! # Ok(())
//! # }
//! ```

mod config;
#[cfg(feature = "client")]
mod http;

pub use config::{
    ClientConfig, API_URL_ENV, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS, TIMEOUT_ENV,
};
#[cfg(feature = "client")]
pub use http::HttpBackend;
