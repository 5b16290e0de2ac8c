use std::collections::HashMap;
use std::sync::Mutex;

/// Fixed storage keys, matching the layout the portal has always used so an
/// in-flight draft survives the swap of storage backends.
pub mod keys {
    pub const PERSONAL_DETAILS: &str = "application_personal_details";
    pub const LICENSE_DETAILS: &str = "application_license_details";
    pub const DOCUMENTS: &str = "application_documents";
    pub const APPLICATION_STATUS: &str = "application_status";
    /// Owned by the auth layer; `clear_session` must leave it untouched.
    pub const USER_SESSION: &str = "user_session";

    pub const DRAFT_KEYS: [&str; 4] = [
        PERSONAL_DETAILS,
        LICENSE_DETAILS,
        DOCUMENTS,
        APPLICATION_STATUS,
    ];
}

/// Error enumeration for storage failures.
///
/// Callers in the session layer catch these, log, and degrade to defaults;
/// they never cross the call boundary into step rendering.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session storage unavailable: {0}")]
    Unavailable(String),
    #[error("session storage rejected write for '{key}': {reason}")]
    WriteRejected { key: String, reason: String },
}

/// Session-scoped key/value storage for the in-progress draft.
///
/// Values are JSON strings; the trait stays string-typed so an in-memory
/// store can stand in for the browser-session-scoped backend in tests.
pub trait SessionStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

/// In-memory store used by tests and the CLI demo.
#[derive(Default)]
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemorySessionStore {
    pub fn len(&self) -> usize {
        self.entries.lock().expect("store mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        let guard = self.entries.lock().expect("store mutex poisoned");
        Ok(guard.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("store mutex poisoned");
        guard.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.lock().expect("store mutex poisoned");
        guard.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trips_values() {
        let store = MemorySessionStore::default();
        store
            .set(keys::PERSONAL_DETAILS, r#"{"first_name":"Juan"}"#)
            .expect("set succeeds");
        let value = store.get(keys::PERSONAL_DETAILS).expect("get succeeds");
        assert_eq!(value.as_deref(), Some(r#"{"first_name":"Juan"}"#));

        store.remove(keys::PERSONAL_DETAILS).expect("remove succeeds");
        assert!(store
            .get(keys::PERSONAL_DETAILS)
            .expect("get succeeds")
            .is_none());
    }

    #[test]
    fn missing_key_reads_as_none() {
        let store = MemorySessionStore::default();
        assert!(store.get("unknown").expect("get succeeds").is_none());
    }
}
