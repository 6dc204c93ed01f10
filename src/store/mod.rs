//! Experiment persistence and execution seams
//!
//! Two traits describe the collaborators the dashboard talks to:
//!
//! - [`ExperimentStore`]: lists, fetches and deletes stored experiments
//! - [`ExperimentRunner`]: executes an [`ExperimentRequest`] and returns the
//!   scored [`Experiment`]
//!
//! [`MemoryStore`] is an in-process store (also used for offline analysis of
//! exported JSON); [`crate::client::HttpBackend`] implements both traits
//! against the remote backend.
//!
//! # Example
//!
//! ```rust,no_run
//! use sweeplab::store::{ExperimentStore, MemoryStore};
//! use sweeplab::experiment::Experiment;
//!
//! # async fn example() -> sweeplab::Result<()> {
//! let store = MemoryStore::new();
//! store.insert(Experiment::new("exp-1", "First", "prompt", Vec::new()));
//!
//! let listed = store.list_experiments().await?;
//! assert_eq!(listed.len(), 1);
//!
//! store.delete_experiment("exp-1").await?;
//! assert!(store.is_empty());
//! # Ok(())
//! # }
//! ```

mod memory;

pub use memory::MemoryStore;

use std::future::Future;

use crate::experiment::{Experiment, ExperimentRequest};
use crate::Result;

/// Read/delete access to previously run experiments.
pub trait ExperimentStore: Send + Sync {
    /// All stored experiments, newest first.
    fn list_experiments(&self) -> impl Future<Output = Result<Vec<Experiment>>> + Send;

    /// Fetch one experiment.
    ///
    /// Returns [`crate::Error::NotFound`] for an unknown id.
    fn get_experiment(&self, id: &str) -> impl Future<Output = Result<Experiment>> + Send;

    /// Delete one experiment.
    ///
    /// Returns [`crate::Error::NotFound`] for an unknown id.
    fn delete_experiment(&self, id: &str) -> impl Future<Output = Result<()>> + Send;

    /// Fetch several experiments, preserving the order of `ids`.
    ///
    /// Fails on the first unknown id.
    fn get_experiments(
        &self,
        ids: &[&str],
    ) -> impl Future<Output = Result<Vec<Experiment>>> + Send {
        async move {
            let mut experiments = Vec::with_capacity(ids.len());
            for id in ids {
                experiments.push(self.get_experiment(id).await?);
            }
            Ok(experiments)
        }
    }
}

/// Executes a sweep and returns the scored result.
///
/// Failures surface as [`crate::Error::Backend`] carrying the backend's
/// message unmodified.
pub trait ExperimentRunner: Send + Sync {
    /// Run every combination in `request`.
    fn create_experiment(
        &self,
        request: &ExperimentRequest,
    ) -> impl Future<Output = Result<Experiment>> + Send;
}
