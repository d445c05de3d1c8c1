//! Persisted login session.
//!
//! One student record lives under a fixed key. It is written on login, read on
//! start and removed on logout.

use std::collections::BTreeMap;
use std::io;
use std::path::PathBuf;

use crate::error::Result;
use crate::models::Student;

/// Key the student record is stored under.
pub const SESSION_KEY: &str = "student";

/// String key-value persistence primitive.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> io::Result<Option<String>>;
    fn set(&mut self, key: &str, value: String) -> io::Result<()>;
    fn remove(&mut self, key: &str) -> io::Result<()>;
}

/// Keys stored as one JSON object in a file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> io::Result<BTreeMap<String, String>> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => serde_json::from_str(&content).map_err(io::Error::other),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e),
        }
    }

    /// Current entries for a rewrite. An unreadable file is replaced.
    fn read_for_write(&self) -> BTreeMap<String, String> {
        self.read_all().unwrap_or_else(|e| {
            tracing::warn!("Discarding unreadable session file {}: {}", self.path.display(), e);
            BTreeMap::new()
        })
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if entries.is_empty() {
            return match std::fs::remove_file(&self.path) {
                Err(e) if e.kind() != io::ErrorKind::NotFound => Err(e),
                _ => Ok(()),
            };
        }

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(entries).map_err(io::Error::other)?;

        // Write next to the target then rename so a crash never leaves half a file
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content)?;
        std::fs::rename(&tmp, &self.path)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> io::Result<()> {
        let mut entries = self.read_for_write();
        entries.insert(key.to_string(), value);
        self.write_all(&entries)
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        let mut entries = self.read_for_write();
        if entries.remove(key).is_some() || self.path.exists() {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

/// In-memory store for tests.
#[cfg(test)]
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: std::collections::HashMap<String, String>,
}

#[cfg(test)]
impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> io::Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> io::Result<()> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> io::Result<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// Save/load/clear contract for the student record.
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    backend: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    /// Persist the record, replacing any previous one.
    pub fn save(&mut self, student: &Student) -> Result<()> {
        let raw = serde_json::to_string(student)?;
        self.backend.set(SESSION_KEY, raw)?;
        Ok(())
    }

    /// Previously saved record.
    ///
    /// Storage and decoding failures are reported as no session.
    pub fn load(&self) -> Option<Student> {
        let raw = match self.backend.get(SESSION_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("Failed to read session: {}", e);
                return None;
            }
        };

        match serde_json::from_str(&raw) {
            Ok(student) => Some(student),
            Err(e) => {
                tracing::warn!("Stored session is not a student record: {}", e);
                None
            }
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.backend.remove(SESSION_KEY)?;
        Ok(())
    }

    /// Raw stored value, bypassing decoding.
    #[cfg(test)]
    pub(crate) fn raw(&self) -> Option<String> {
        self.backend.get(SESSION_KEY).ok().flatten()
    }
}

/// The logged-in student, owned by the navigation shell.
///
/// Screens read the student from here. Only sign-in and sign-out write it,
/// and both keep the store and the in-memory copy in step.
#[derive(Debug)]
pub struct SessionContext<S> {
    store: SessionStore<S>,
    current: Option<Student>,
}

impl<S: KeyValueStore> SessionContext<S> {
    /// Load whatever the store holds.
    pub fn restore(store: SessionStore<S>) -> Self {
        let current = store.load();
        match &current {
            Some(student) => tracing::info!("Restored session for {}", student.school_id()),
            None => tracing::info!("No stored session"),
        }
        Self { store, current }
    }

    pub fn current(&self) -> Option<&Student> {
        self.current.as_ref()
    }

    pub fn is_signed_in(&self) -> bool {
        self.current.is_some()
    }

    /// Persist first, so a storage failure leaves the context signed out.
    pub fn sign_in(&mut self, student: Student) -> Result<()> {
        self.store.save(&student)?;
        self.current = Some(student);
        Ok(())
    }

    pub fn sign_out(&mut self) {
        if let Err(e) = self.store.clear() {
            tracing::warn!("Failed to clear session: {}", e);
        }
        self.current = None;
    }

    pub fn store(&self) -> &SessionStore<S> {
        &self.store
    }

    pub fn into_store(self) -> SessionStore<S> {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn student() -> Student {
        serde_json::from_value(json!({"id": 9, "school_id": "E42", "name": "Lina", "class": "L2"})).unwrap()
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("student-portal-{}-{}.json", std::process::id(), name))
    }

    #[test]
    fn test_memory_save_load_clear() {
        let mut store = SessionStore::new(MemoryStore::default());
        assert!(store.load().is_none());

        store.save(&student()).unwrap();
        assert_eq!(store.load(), Some(student()));

        store.clear().unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_overwrites() {
        let mut store = SessionStore::new(MemoryStore::default());
        store.save(&student()).unwrap();

        let other: Student = serde_json::from_value(json!({"id": 10, "name": "Omar"})).unwrap();
        store.save(&other).unwrap();
        assert_eq!(store.load(), Some(other));
    }

    #[test]
    fn test_corrupt_value_loads_as_absent() {
        let mut backend = MemoryStore::default();
        backend.set(SESSION_KEY, "not json".to_string()).unwrap();
        let store = SessionStore::new(backend);
        assert!(store.load().is_none());
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = temp_path("round-trip");
        let _ = std::fs::remove_file(&path);

        let mut store = SessionStore::new(FileStore::new(&path));
        store.save(&student()).unwrap();

        let reopened = SessionStore::new(FileStore::new(&path));
        assert_eq!(reopened.load(), Some(student()));

        let mut reopened = reopened;
        reopened.clear().unwrap();
        assert!(!path.exists());
        assert!(reopened.load().is_none());
    }

    #[test]
    fn test_unreadable_file_loads_as_absent() {
        let path = temp_path("garbage");
        std::fs::write(&path, "{{{").unwrap();

        let store = SessionStore::new(FileStore::new(&path));
        assert!(store.load().is_none());

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unreadable_file_is_overwritten_on_save() {
        let path = temp_path("garbage-save");
        std::fs::write(&path, "{{{").unwrap();

        let mut store = SessionStore::new(FileStore::new(&path));
        store.save(&student()).unwrap();
        assert_eq!(store.load(), Some(student()));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_unreadable_file_is_removed_on_clear() {
        let path = temp_path("garbage-clear");
        std::fs::write(&path, r#"{"student": 5}"#).unwrap();

        let mut store = SessionStore::new(FileStore::new(&path));
        store.clear().unwrap();
        assert!(!path.exists());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_context_sign_in_and_out() {
        let mut context = SessionContext::restore(SessionStore::new(MemoryStore::default()));
        assert!(!context.is_signed_in());

        context.sign_in(student()).unwrap();
        assert_eq!(context.current(), Some(&student()));
        assert_eq!(context.store().load(), Some(student()));

        context.sign_out();
        assert!(context.current().is_none());
        assert!(context.store().load().is_none());
    }
}
