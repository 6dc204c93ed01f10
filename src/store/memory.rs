//! In-memory experiment store using `DashMap`.
//!
//! Data is lost on process restart unless written back with
//! [`MemoryStore::save_json`].

use std::path::Path;

use dashmap::DashMap;
use tracing::debug;

use super::ExperimentStore;
use crate::experiment::Experiment;
use crate::{Error, Result};

/// Thread-safe in-process experiment store keyed by experiment id.
///
/// # Example
///
/// ```rust
/// use sweeplab::experiment::Experiment;
/// use sweeplab::store::MemoryStore;
///
/// let store = MemoryStore::new();
/// store.insert(Experiment::new("exp-1", "First", "prompt", Vec::new()));
/// assert_eq!(store.len(), 1);
/// assert!(store.contains("exp-1"));
/// ```
pub struct MemoryStore {
    experiments: DashMap<String, Experiment>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            experiments: DashMap::new(),
        }
    }

    /// Create a store pre-filled with `experiments` (later ids win).
    #[must_use]
    pub fn from_experiments(experiments: impl IntoIterator<Item = Experiment>) -> Self {
        let store = Self::new();
        for experiment in experiments {
            store.insert(experiment);
        }
        store
    }

    /// Load a JSON array of experiments (backend wire format).
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::Other(format!(
                "Failed to read experiments file {}: {e}",
                path.as_ref().display()
            ))
        })?;
        let experiments: Vec<Experiment> = serde_json::from_str(&raw)?;
        debug!(count = experiments.len(), "loaded experiments from file");
        Ok(Self::from_experiments(experiments))
    }

    /// Write all experiments, newest first, as a JSON array.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or the write fails.
    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Insert or replace an experiment.
    pub fn insert(&self, experiment: Experiment) {
        debug!(id = experiment.experiment_id(), "storing experiment");
        self.experiments
            .insert(experiment.experiment_id().to_string(), experiment);
    }

    /// Whether `id` is stored.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.experiments.contains_key(id)
    }

    /// Number of stored experiments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// Whether the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    /// Remove everything.
    pub fn clear(&self) {
        self.experiments.clear();
    }

    /// All experiments, newest first; ties ordered by id.
    #[must_use]
    pub fn snapshot(&self) -> Vec<Experiment> {
        let mut experiments: Vec<Experiment> = self
            .experiments
            .iter()
            .map(|entry| entry.value().clone())
            .collect();
        experiments.sort_by(|a, b| {
            b.created_at()
                .cmp(&a.created_at())
                .then_with(|| a.experiment_id().cmp(b.experiment_id()))
        });
        experiments
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExperimentStore for MemoryStore {
    async fn list_experiments(&self) -> Result<Vec<Experiment>> {
        Ok(self.snapshot())
    }

    async fn get_experiment(&self, id: &str) -> Result<Experiment> {
        self.experiments
            .get(id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }

    async fn delete_experiment(&self, id: &str) -> Result<()> {
        debug!(id, "deleting experiment");
        self.experiments
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound(id.to_string()))
    }
}
