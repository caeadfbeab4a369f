//! Stable per-install identity resolution.
//!
//! Resolution order: an externally supplied session uid wins; otherwise
//! the persisted locally generated uid; otherwise a fresh UUID v4 is
//! generated and persisted before it is ever used, so every later call
//! returns the same value.

use log::info;
use uuid::Uuid;

use crate::state::{StateError, StateStore};

/// Resolve the identity records are grouped under.
pub fn resolve_identity(
    session_uid: Option<&str>,
    store: &StateStore,
) -> Result<String, StateError> {
    if let Some(uid) = session_uid {
        let uid = uid.trim();
        if !uid.is_empty() {
            return Ok(uid.to_string());
        }
    }
    if let Some(uid) = store.local_uid() {
        return Ok(uid);
    }
    let uid = Uuid::new_v4().to_string();
    store.set_local_uid(&uid)?;
    info!("generated new local identity {uid}");
    Ok(uid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn session_uid_wins() {
        let dir = tempdir().unwrap();
        let store = StateStore::open(dir.path().join("state.json")).unwrap();
        store.set_local_uid("local-uid").unwrap();
        let id = resolve_identity(Some("session-uid"), &store).unwrap();
        assert_eq!(id, "session-uid");
    }

    #[test]
    fn blank_session_uid_is_ignored() {
        let dir = tempdir().unwrap();
        let store = StateStore::open(dir.path().join("state.json")).unwrap();
        store.set_local_uid("local-uid").unwrap();
        let id = resolve_identity(Some("   "), &store).unwrap();
        assert_eq!(id, "local-uid");
    }

    #[test]
    fn generates_and_persists_uid() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.json");
        let store = StateStore::open(&path).unwrap();
        let id = resolve_identity(None, &store).unwrap();
        assert!(!id.is_empty());
        assert_eq!(store.local_uid().as_deref(), Some(id.as_str()));

        // Survives reopen.
        let store = StateStore::open(&path).unwrap();
        assert_eq!(resolve_identity(None, &store).unwrap(), id);
    }

    #[test]
    fn idempotent_across_calls() {
        let dir = tempdir().unwrap();
        let store = StateStore::open(dir.path().join("state.json")).unwrap();
        let first = resolve_identity(None, &store).unwrap();
        let second = resolve_identity(None, &store).unwrap();
        assert_eq!(first, second);
    }
}
