//! In-memory store tests through the `ExperimentStore` trait

use std::path::PathBuf;

use chrono::{TimeZone, Utc};
use sweeplab::experiment::{Experiment, GenerationParameters, MetricVector, ResponseRecord};
use sweeplab::store::{ExperimentStore, MemoryStore};
use sweeplab::Error;

fn experiment(id: &str, day: u32, responses: usize) -> Experiment {
    let responses = (0..responses)
        .map(|_| {
            ResponseRecord::new(
                "text",
                GenerationParameters::new(0.5, 0.5, 500),
                MetricVector::default(),
            )
        })
        .collect();
    Experiment::builder(id, format!("Experiment {id}"))
        .prompt("prompt")
        .responses(responses)
        .created_at(Utc.with_ymd_and_hms(2024, 3, day, 8, 0, 0).unwrap())
        .build()
}

fn scratch_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("sweeplab-store-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

/// Generic over the trait so the same checks apply to any store.
async fn assert_delete_removes<S: ExperimentStore>(store: &S, id: &str) {
    store.delete_experiment(id).await.unwrap();
    assert!(matches!(store.get_experiment(id).await, Err(Error::NotFound(_))));
    assert!(store
        .list_experiments()
        .await
        .unwrap()
        .iter()
        .all(|e| e.experiment_id() != id));
}

#[tokio::test]
async fn test_list_get_delete_cycle() {
    let store = MemoryStore::from_experiments([
        experiment("a", 1, 2),
        experiment("b", 2, 0),
        experiment("c", 3, 1),
    ]);

    let listed = store.list_experiments().await.unwrap();
    let ids: Vec<&str> = listed.iter().map(Experiment::experiment_id).collect();
    assert_eq!(ids, vec!["c", "b", "a"]);

    let fetched = store.get_experiment("a").await.unwrap();
    assert_eq!(fetched.responses().len(), 2);

    assert_delete_removes(&store, "b").await;
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_delete_twice_reports_not_found() {
    let store = MemoryStore::from_experiments([experiment("a", 1, 0)]);
    store.delete_experiment("a").await.unwrap();
    let err = store.delete_experiment("a").await.unwrap_err();
    assert_eq!(err.to_string(), "Experiment not found: a");
}

#[tokio::test]
async fn test_json_file_round_trip() {
    let path = scratch_file("round_trip.json");
    let store = MemoryStore::from_experiments([experiment("a", 1, 3), experiment("b", 2, 1)]);
    store.save_json(&path).unwrap();

    let loaded = MemoryStore::load_json(&path).unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(
        loaded.get_experiment("a").await.unwrap(),
        store.get_experiment("a").await.unwrap()
    );
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_backend_export_with_legacy_ids() {
    let path = scratch_file("legacy.json");
    std::fs::write(
        &path,
        r#"[
            {"id": 7, "name": "Legacy", "prompt": "p", "created_at": "2024-01-02T03:04:05"},
            {"experiment_id": "new", "name": "New", "prompt": "p",
             "created_at": "2024-01-03T00:00:00+00:00", "responses": [], "response_count": 0}
        ]"#,
    )
    .unwrap();

    let store = MemoryStore::load_json(&path).unwrap();
    assert!(store.contains("7"));
    assert!(store.contains("new"));
    assert_eq!(store.snapshot()[0].experiment_id(), "new");
    std::fs::remove_file(&path).unwrap();
}

#[test]
fn test_load_missing_file_fails() {
    let result = MemoryStore::load_json(scratch_file("does-not-exist.json"));
    assert!(result.is_err());
}

#[test]
fn test_store_is_shareable_across_threads() {
    let store = std::sync::Arc::new(MemoryStore::new());
    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            let store = std::sync::Arc::clone(&store);
            std::thread::spawn(move || store.insert(experiment(&format!("t{i}"), i + 1, 0)))
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }
    assert_eq!(store.len(), 4);
    store.clear();
    assert!(store.is_empty());
}
