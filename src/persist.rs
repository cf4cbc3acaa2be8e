//! Snapshot persistence as JSON
//!
//! The on-disk layout is the snapshot's own serde shape. Loading always goes
//! through the store so a restored snapshot is validated like any other.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use thiserror::Error;

use crate::error::ValidationError;
use crate::model::PlanSnapshot;
use crate::store::{Action, PlanStore};

#[derive(Error, Debug)]
pub enum PersistError {
    #[error("failed to access snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot rejected: {0}")]
    Invalid(#[from] ValidationError),
}

pub fn to_json(snapshot: &PlanSnapshot) -> Result<String, PersistError> {
    Ok(serde_json::to_string_pretty(snapshot)?)
}

pub fn from_json(json: &str) -> Result<PlanSnapshot, PersistError> {
    Ok(serde_json::from_str(json)?)
}

/// Write the store's current snapshot to `path`
pub fn save(store: &PlanStore, path: &Path) -> Result<(), PersistError> {
    let json = to_json(&store.get())?;
    fs::write(path, json)?;
    tracing::debug!(path = %path.display(), "snapshot saved");
    Ok(())
}

/// Read a snapshot from `path` and load it into the store
pub fn load(store: &mut PlanStore, path: &Path) -> Result<Arc<PlanSnapshot>, PersistError> {
    let json = fs::read_to_string(path)?;
    let snapshot = from_json(&json)?;
    let loaded = store.dispatch(Action::load(snapshot))?;
    tracing::info!(path = %path.display(), suppliers = loaded.suppliers.len(), "snapshot restored");
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_seed_round_trips() {
        let seed = PlanSnapshot::seed();
        let restored = from_json(&to_json(&seed).unwrap()).unwrap();
        assert_eq!(restored, seed);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");

        let mut store = PlanStore::default();
        store
            .dispatch(Action::DeleteSupplier { id: "2".into() })
            .unwrap();
        save(&store, &path).unwrap();

        let mut fresh = PlanStore::default();
        let loaded = load(&mut fresh, &path).unwrap();
        assert_eq!(*loaded, *store.get());
        assert!(loaded.supplier("2").is_none());
    }

    #[test]
    fn test_load_rejects_missing_actor() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plan.json");
        let mut snapshot = PlanSnapshot::seed();
        snapshot.actors.pop();
        fs::write(&path, to_json(&snapshot).unwrap()).unwrap();

        let mut store = PlanStore::default();
        let before = store.get();
        assert!(matches!(load(&mut store, &path), Err(PersistError::Invalid(_))));
        assert!(Arc::ptr_eq(&before, &store.get()));
    }

    #[test]
    fn test_load_missing_file() {
        let mut store = PlanStore::default();
        let result = load(&mut store, Path::new("/nonexistent/plan.json"));
        assert!(matches!(result, Err(PersistError::Io(_))));
    }
}
