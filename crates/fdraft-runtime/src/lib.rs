#![forbid(unsafe_code)]

//! Orchestration shell for FrankenDraft.
//!
//! Wires the pure decisions from `fdraft-core` to the outside world:
//!
//! - [`DraftEngine`]: the per-instance state machine
//!   (`Idle → Mounted → Watching`) that watches subject data, persists the
//!   meaningful subset, and offers stored drafts back.
//! - [`storage`]: the [`StorageBackend`] strategy with a session-scoped and a
//!   local (on-disk) implementation, selected by [`StorageMode`].
//! - [`debounce`]: trailing-edge coalescing of rapid-fire changes.
//! - [`registry`]: duplicate-key detection across live instances.
//! - [`confirm`]: the yes/no prompt the restore path asks before invoking the
//!   caller's callback.
//!
//! Everything is single-threaded and cooperative: the host feeds changes in
//! through [`DraftEngine::update`] and pumps [`DraftEngine::tick`] with an
//! explicit `Instant`, so evaluation order and coalescing are deterministic.
//!
//! # Example
//!
//! ```
//! use fdraft_core::DraftValue;
//! use fdraft_runtime::{
//!     DraftEngine, EngineOptions, KeyRegistry, StorageSet, StoreOptions,
//!     confirm::AutoConfirm, storage::SessionStore,
//! };
//! use web_time::Instant;
//!
//! let storage = StorageSet::new().with_session(SessionStore::new());
//! let registry = KeyRegistry::new();
//!
//! let mut engine = DraftEngine::new(
//!     EngineOptions {
//!         key: "signup-form".into(),
//!         store: StoreOptions {
//!             data: DraftValue::object([("name", DraftValue::from("ada"))]),
//!             ..Default::default()
//!         },
//!         ..Default::default()
//!     },
//!     &storage,
//!     registry,
//!     AutoConfirm,
//!     |restored| drop(restored),
//! );
//!
//! let now = Instant::now();
//! engine.mount(now);
//! ```

pub mod confirm;
pub mod debounce;
pub mod engine;
pub mod registry;
pub mod storage;

pub use confirm::{AutoConfirm, AutoDecline, ConfirmOracle, DEFAULT_RESTORE_PROMPT};
pub use debounce::Debouncer;
pub use engine::{DraftEngine, EngineOptions, EnginePhase, RestoreOptions, StoreOptions};
pub use registry::{KeyRegistry, Registration};
pub use storage::{LocalStore, SessionStore, StorageBackend, StorageError, StorageMode, StorageSet};
