#![forbid(unsafe_code)]

//! Storage strategy: where drafts live between sessions.
//!
//! Exactly two backends implement [`StorageBackend`]:
//!
//! - [`SessionStore`] — an in-memory map scoped to the process. Clones share
//!   the underlying map, so every instance holding a clone observes writes
//!   immediately.
//! - [`LocalStore`] — one JSON file per key under a root directory, surviving
//!   process restarts.
//!
//! Callers pick a backend with [`StorageMode`] at engine construction; the
//! [`StorageSet`] resolves the mode to whichever backends the host installed.
//! A mode without an installed backend resolves to nothing, which makes the
//! requesting engine inert.
//!
//! On-disk drafts travel in a version-tagged [`StoredDraft`] envelope. A
//! version mismatch on read is reported as "nothing stored" rather than an
//! error, so schema drift degrades to a fresh start instead of a failure.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use ahash::AHashMap;
use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};

use fdraft_core::DraftValue;

/// Current schema version of the on-disk draft envelope.
const STORED_DRAFT_VERSION: u32 = 1;

/// Errors from storage operations.
#[derive(Debug)]
pub enum StorageError {
    /// Filesystem failure while reading or writing a draft file.
    Io(io::Error),
    /// A draft file could not be encoded or decoded.
    Codec(serde_json::Error),
}

impl std::fmt::Display for StorageError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage i/o error: {err}"),
            Self::Codec(err) => write!(f, "draft codec error: {err}"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Codec(err) => Some(err),
        }
    }
}

impl From<io::Error> for StorageError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(err: serde_json::Error) -> Self {
        Self::Codec(err)
    }
}

/// Version-tagged envelope for persisted drafts.
#[derive(Debug, Serialize, Deserialize)]
struct StoredDraft {
    version: u32,
    data: DraftValue,
}

/// A key/value store for drafts.
///
/// A write must be visible to the next read through any handle on the same
/// underlying store.
pub trait StorageBackend {
    /// Read the draft stored under `key`, if any.
    fn read(&self, key: &str) -> Result<Option<DraftValue>, StorageError>;

    /// Write `value` under `key`, replacing any previous draft.
    fn write(&mut self, key: &str, value: &DraftValue) -> Result<(), StorageError>;
}

// ---------------------------------------------------------------------------
// SessionStore — in-memory, process-scoped
// ---------------------------------------------------------------------------

/// In-memory draft store scoped to the process lifetime.
///
/// `Clone` shares the underlying map, mirroring how every part of a session
/// sees the same session storage.
#[derive(Clone, Default)]
pub struct SessionStore {
    entries: Rc<RefCell<AHashMap<String, DraftValue>>>,
}

impl SessionStore {
    /// Create an empty session store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of drafts currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    /// Whether the store holds no drafts.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl StorageBackend for SessionStore {
    fn read(&self, key: &str) -> Result<Option<DraftValue>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &DraftValue) -> Result<(), StorageError> {
        self.entries.borrow_mut().insert(key.to_owned(), value.clone());
        Ok(())
    }
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("len", &self.entries.borrow().len())
            .finish()
    }
}

// ---------------------------------------------------------------------------
// LocalStore — one JSON file per key
// ---------------------------------------------------------------------------

/// On-disk draft store: one JSON file per key under a root directory.
///
/// Keys are arbitrary strings, so file names are the url-safe base64 of the
/// key rather than the key itself.
#[derive(Clone, Debug)]
pub struct LocalStore {
    root: PathBuf,
}

impl LocalStore {
    /// Create a store rooted at `root`. The directory is created lazily on
    /// the first write.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name = URL_SAFE_NO_PAD.encode(key.as_bytes());
        self.root.join(format!("{name}.json"))
    }
}

impl StorageBackend for LocalStore {
    fn read(&self, key: &str) -> Result<Option<DraftValue>, StorageError> {
        let bytes = match fs::read(self.path_for(key)) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let envelope: StoredDraft = serde_json::from_slice(&bytes)?;
        if envelope.version != STORED_DRAFT_VERSION {
            return Ok(None);
        }
        Ok(Some(envelope.data))
    }

    fn write(&mut self, key: &str, value: &DraftValue) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)?;
        let envelope = StoredDraft {
            version: STORED_DRAFT_VERSION,
            data: value.clone(),
        };
        let bytes = serde_json::to_vec(&envelope)?;
        fs::write(self.path_for(key), bytes)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Mode selection
// ---------------------------------------------------------------------------

/// Which backend an engine persists through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StorageMode {
    /// Process-scoped, in-memory persistence.
    #[default]
    Session,
    /// Disk-scoped persistence that survives restarts.
    Local,
}

/// The backends a host has installed, resolved by [`StorageMode`].
///
/// A host typically installs one or both at startup and hands the set to
/// every engine it creates. Resolving a mode with no installed backend
/// yields `None`, which the engine treats as a reason to go inert.
#[derive(Clone, Debug, Default)]
pub struct StorageSet {
    session: Option<SessionStore>,
    local: Option<LocalStore>,
}

impl StorageSet {
    /// Create a set with no installed backends.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a session-scoped backend.
    #[must_use]
    pub fn with_session(mut self, store: SessionStore) -> Self {
        self.session = Some(store);
        self
    }

    /// Install a local (on-disk) backend.
    #[must_use]
    pub fn with_local(mut self, store: LocalStore) -> Self {
        self.local = Some(store);
        self
    }

    /// Resolve `mode` to a backend handle, if one is installed.
    #[must_use]
    pub fn resolve(&self, mode: StorageMode) -> Option<Box<dyn StorageBackend>> {
        match mode {
            StorageMode::Session => self
                .session
                .clone()
                .map(|s| Box::new(s) as Box<dyn StorageBackend>),
            StorageMode::Local => self
                .local
                .clone()
                .map(|s| Box::new(s) as Box<dyn StorageBackend>),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_store_round_trip() {
        let mut store = SessionStore::new();
        assert_eq!(store.read("k").unwrap(), None);

        let value = DraftValue::object([("name", "ada".into())]);
        store.write("k", &value).unwrap();
        assert_eq!(store.read("k").unwrap(), Some(value));
    }

    #[test]
    fn session_store_clones_share_entries() {
        let mut writer = SessionStore::new();
        let reader = writer.clone();

        let value = DraftValue::from("draft");
        writer.write("shared", &value).unwrap();
        assert_eq!(reader.read("shared").unwrap(), Some(value));
        assert_eq!(reader.len(), 1);
    }

    #[test]
    fn session_store_overwrites() {
        let mut store = SessionStore::new();
        store.write("k", &DraftValue::from(1)).unwrap();
        store.write("k", &DraftValue::from(2)).unwrap();
        assert_eq!(store.read("k").unwrap(), Some(DraftValue::from(2)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn local_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());

        assert_eq!(store.read("k").unwrap(), None);

        let value = DraftValue::object([("name", "ada".into())]);
        store.write("k", &value).unwrap();
        assert_eq!(store.read("k").unwrap(), Some(value));
    }

    #[test]
    fn local_store_write_visible_to_fresh_handle() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = LocalStore::new(dir.path());
        let value = DraftValue::from("persisted");
        writer.write("k", &value).unwrap();

        let reader = LocalStore::new(dir.path());
        assert_eq!(reader.read("k").unwrap(), Some(value));
    }

    #[test]
    fn local_store_keys_may_contain_path_hostile_characters() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());

        let key = "form/../step:2";
        let value = DraftValue::from(1);
        store.write(key, &value).unwrap();
        assert_eq!(store.read(key).unwrap(), Some(value));
    }

    #[test]
    fn local_store_version_mismatch_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());
        store.write("k", &DraftValue::from(1)).unwrap();

        // Rewrite the envelope with a future version.
        let path = store.path_for("k");
        let raw = std::fs::read_to_string(&path).unwrap();
        let bumped = raw.replace("\"version\":1", "\"version\":999");
        std::fs::write(&path, bumped).unwrap();

        assert_eq!(store.read("k").unwrap(), None);
    }

    #[test]
    fn local_store_corrupt_file_is_a_codec_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = LocalStore::new(dir.path());
        store.write("k", &DraftValue::from(1)).unwrap();
        std::fs::write(store.path_for("k"), b"not json").unwrap();

        assert!(matches!(store.read("k"), Err(StorageError::Codec(_))));
    }

    #[test]
    fn storage_set_resolves_installed_modes_only() {
        let set = StorageSet::new().with_session(SessionStore::new());
        assert!(set.resolve(StorageMode::Session).is_some());
        assert!(set.resolve(StorageMode::Local).is_none());

        let empty = StorageSet::new();
        assert!(empty.resolve(StorageMode::Session).is_none());
    }

    #[test]
    fn storage_set_resolution_shares_the_session_map() {
        let session = SessionStore::new();
        let set = StorageSet::new().with_session(session.clone());

        let mut handle = set.resolve(StorageMode::Session).unwrap();
        handle.write("k", &DraftValue::from(5)).unwrap();
        assert_eq!(session.read("k").unwrap(), Some(DraftValue::from(5)));
    }
}
