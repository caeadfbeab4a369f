//! Durable local state: the generated install identity and the count of
//! successfully uploaded snapshots.
//!
//! State is one small JSON file rewritten in full on every change.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from reading or writing the state file.
#[derive(Debug, Error)]
pub enum StateError {
    #[error("failed to read state file")]
    Read(#[source] io::Error),
    #[error("failed to write state file")]
    Write(#[source] io::Error),
    #[error("state file is not valid JSON")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct PersistedState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    local_uid: Option<String>,
    #[serde(default)]
    sent_count: u64,
}

/// Handle to the on-disk state file.
pub struct StateStore {
    path: PathBuf,
    state: Mutex<PersistedState>,
}

impl StateStore {
    /// Open the state file at `path`, creating empty in-memory state if
    /// the file does not exist yet. The file itself is only written on
    /// the first mutation.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StateError> {
        let path = path.into();
        let state = match fs::read_to_string(&path) {
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => PersistedState::default(),
            Err(e) => return Err(StateError::Read(e)),
        };
        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The persisted locally generated identity, if one exists.
    pub fn local_uid(&self) -> Option<String> {
        self.state.lock().unwrap().local_uid.clone()
    }

    /// Persist a locally generated identity.
    pub fn set_local_uid(&self, uid: &str) -> Result<(), StateError> {
        let mut state = self.state.lock().unwrap();
        state.local_uid = Some(uid.to_string());
        self.persist(&state)
    }

    /// Number of snapshots uploaded successfully so far.
    pub fn sent_count(&self) -> u64 {
        self.state.lock().unwrap().sent_count
    }

    /// Increment the upload counter and persist it. Returns the new
    /// count. Call only after a confirmed successful upload.
    pub fn record_sent(&self) -> Result<u64, StateError> {
        let mut state = self.state.lock().unwrap();
        state.sent_count += 1;
        self.persist(&state)?;
        Ok(state.sent_count)
    }

    /// Reset the upload counter to zero and persist.
    pub fn reset_sent_count(&self) -> Result<(), StateError> {
        let mut state = self.state.lock().unwrap();
        state.sent_count = 0;
        self.persist(&state)
    }

    fn persist(&self, state: &PersistedState) -> Result<(), StateError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent).map_err(StateError::Write)?;
        }
        let json = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, json).map_err(StateError::Write)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let store = StateStore::open(dir.path().join("state.json")).unwrap();
        assert_eq!(store.local_uid(), None);
        assert_eq!(store.sent_count(), 0);
    }

    #[test]
    fn uid_survives_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = StateStore::open(&path).unwrap();
        store.set_local_uid("abc-123").unwrap();
        drop(store);

        let store = StateStore::open(&path).unwrap();
        assert_eq!(store.local_uid().as_deref(), Some("abc-123"));
    }

    #[test]
    fn counter_increments_and_persists() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = StateStore::open(&path).unwrap();
        assert_eq!(store.record_sent().unwrap(), 1);
        assert_eq!(store.record_sent().unwrap(), 2);
        drop(store);

        let store = StateStore::open(&path).unwrap();
        assert_eq!(store.sent_count(), 2);
    }

    #[test]
    fn counter_resets_to_zero() {
        let dir = tempdir().unwrap();
        let store = StateStore::open(dir.path().join("state.json")).unwrap();
        store.record_sent().unwrap();
        store.reset_sent_count().unwrap();
        assert_eq!(store.sent_count(), 0);
    }

    #[test]
    fn creates_missing_parent_directories() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("state.json");
        let store = StateStore::open(&path).unwrap();
        store.set_local_uid("x").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(
            StateStore::open(&path),
            Err(StateError::Parse(_))
        ));
    }
}
