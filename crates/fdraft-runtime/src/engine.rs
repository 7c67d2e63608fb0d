#![forbid(unsafe_code)]

//! The draft-restoration engine.
//!
//! A [`DraftEngine`] instance watches one piece of subject data on behalf of
//! a host component. It persists the meaningful projection of that data when
//! it changes, and offers a previously stored draft back to the caller when
//! the restore trigger fires.
//!
//! The host drives the engine with four entry points:
//!
//! - [`mount`](DraftEngine::mount) once, when the owning component attaches;
//! - [`update`](DraftEngine::update) whenever the subject data may have
//!   changed (changes are deduplicated by structural equality, so calling on
//!   every render is fine);
//! - [`set_restore_when`](DraftEngine::set_restore_when) when the restore
//!   trigger condition changes;
//! - [`tick`](DraftEngine::tick) periodically with the current time, which
//!   drains the two debounce timers and performs due evaluations.
//!
//! # Lifecycle
//!
//! `Idle → Mounted (stored draft read) → Watching`. There is no terminal
//! state; the engine lives as long as its host keeps it.
//!
//! # Failure boundary
//!
//! Storage errors never propagate to the host. They are logged with the
//! instance key and the engine degrades to inert: no further reads, writes,
//! or effects. An engine is also inert from birth when `open` is false, when
//! its key is empty, or when the selected [`StorageMode`] has no installed
//! backend.

use web_time::{Duration, Instant};

use fdraft_core::{DraftValue, can_restore, can_store, project, reconcile, resolve_when};

use crate::confirm::{ConfirmOracle, DEFAULT_RESTORE_PROMPT};
use crate::debounce::Debouncer;
use crate::registry::{KeyRegistry, Registration};
use crate::storage::{StorageBackend, StorageError, StorageMode, StorageSet};

/// Quiet window for coalescing store evaluations.
const STORE_DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// Default quiet window for coalescing restore evaluations.
const RESTORE_DEBOUNCE_WINDOW: Duration = Duration::from_millis(500);

/// What to watch and when storing is allowed.
#[derive(Clone, Debug, Default)]
pub struct StoreOptions {
    /// Initial subject data.
    pub data: DraftValue,
    /// Optional field allowlist; when set, only these fields of an object
    /// subject are compared and stored.
    pub required: Option<Vec<String>>,
    /// Store gating condition. `Some(false)` is an explicit veto and wins
    /// over the top-level `when`; `None` defers to it.
    pub when: Option<bool>,
    /// Cosmetic label included in store trace output.
    pub title: Option<String>,
}

/// How and when stored drafts are offered back.
#[derive(Clone, Debug)]
pub struct RestoreOptions {
    /// Restore gating condition, resolved the same way as the store one.
    pub when: Option<bool>,
    /// Confirmation text; defaults to [`DEFAULT_RESTORE_PROMPT`].
    pub prompt: Option<String>,
    /// Quiet window for coalescing restore-trigger changes.
    pub delay: Duration,
}

impl Default for RestoreOptions {
    fn default() -> Self {
        Self {
            when: None,
            prompt: None,
            delay: RESTORE_DEBOUNCE_WINDOW,
        }
    }
}

/// Engine configuration. Construct with struct-update syntax:
///
/// ```
/// # use fdraft_runtime::EngineOptions;
/// let options = EngineOptions {
///     key: "signup-form".into(),
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct EngineOptions {
    /// Storage key. Caller-supplied and mandatory; an engine with an empty
    /// key degrades to inert at construction.
    pub key: String,
    /// When set, traced together with the key at mount.
    pub debug_tag: Option<String>,
    /// Which installed backend to persist through.
    pub mode: StorageMode,
    /// Master enable switch; `false` makes the instance fully inert.
    pub open: bool,
    /// Top-level gating condition, consulted when the scoped one is absent.
    pub when: Option<bool>,
    /// Store-side options.
    pub store: StoreOptions,
    /// Restore-side options.
    pub restore: RestoreOptions,
    /// Bypass the confirmation oracle and invoke the restore callback
    /// directly. The non-interactive path for automated verification.
    pub test: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            key: String::new(),
            debug_tag: None,
            mode: StorageMode::default(),
            open: true,
            when: None,
            store: StoreOptions::default(),
            restore: RestoreOptions::default(),
            test: false,
        }
    }
}

/// Lifecycle phase of an engine instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EnginePhase {
    /// Constructed, not yet mounted.
    Idle,
    /// Mounted; the stored draft has been read.
    Mounted,
    /// At least one subject-data change has been observed.
    Watching,
}

/// Per-instance draft-restoration engine. See the module docs for the
/// driving contract.
pub struct DraftEngine {
    key: String,
    debug_tag: Option<String>,
    test: bool,
    title: Option<String>,
    required: Option<Vec<String>>,
    store_when: Option<bool>,
    top_when: Option<bool>,
    prompt: String,
    backend: Option<Box<dyn StorageBackend>>,
    registry: KeyRegistry,
    oracle: Box<dyn ConfirmOracle>,
    callback: Box<dyn FnMut(DraftValue)>,
    phase: EnginePhase,
    inert: bool,
    data: DraftValue,
    projected: DraftValue,
    stored: Option<DraftValue>,
    trigger: bool,
    store_debounce: Debouncer<DraftValue>,
    restore_debounce: Debouncer<bool>,
}

impl DraftEngine {
    /// Create an engine from `options`, persisting through whichever backend
    /// `storage` resolves for the configured mode.
    ///
    /// `registry` is shared across instances for duplicate-key detection.
    /// `oracle` answers the restore confirmation; `callback` receives the
    /// reconciled data when a restore goes through.
    pub fn new(
        options: EngineOptions,
        storage: &StorageSet,
        registry: KeyRegistry,
        oracle: impl ConfirmOracle + 'static,
        callback: impl FnMut(DraftValue) + 'static,
    ) -> Self {
        let mut inert = !options.open;
        if !inert && options.key.is_empty() {
            tracing::error!("draft engine constructed with an empty key; degrading to inert");
            inert = true;
        }
        let backend = if inert {
            None
        } else {
            let resolved = storage.resolve(options.mode);
            if resolved.is_none() {
                tracing::warn!(
                    key = %options.key,
                    mode = ?options.mode,
                    "no backend installed for storage mode; draft engine is inert"
                );
                inert = true;
            }
            resolved
        };

        let projected = project(&options.store.data, options.store.required.as_deref());
        let trigger = resolve_when(options.restore.when, options.when);

        Self {
            key: options.key,
            debug_tag: options.debug_tag,
            test: options.test,
            title: options.store.title,
            required: options.store.required,
            store_when: options.store.when,
            top_when: options.when,
            prompt: options
                .restore
                .prompt
                .unwrap_or_else(|| DEFAULT_RESTORE_PROMPT.to_owned()),
            backend,
            registry,
            oracle: Box::new(oracle),
            callback: Box::new(callback),
            phase: EnginePhase::Idle,
            inert,
            data: options.store.data,
            projected,
            stored: None,
            trigger,
            store_debounce: Debouncer::new(STORE_DEBOUNCE_WINDOW),
            restore_debounce: Debouncer::new(options.restore.delay),
        }
    }

    /// Attach the engine: register its key, read the stored draft, and
    /// schedule the initial restore evaluation.
    ///
    /// Only the first call has any effect.
    pub fn mount(&mut self, now: Instant) {
        if self.inert || self.phase != EnginePhase::Idle {
            return;
        }
        if let Some(tag) = &self.debug_tag {
            tracing::debug!(tag = %tag, key = %self.key, "draft engine mounted");
        }
        if self.registry.register(&self.key) == Registration::Duplicate {
            tracing::warn!(key = %self.key, "draft key already in use by another instance");
        }
        match self.read_stored() {
            Ok(stored) => self.stored = stored,
            Err(err) => return self.degrade(err),
        }
        self.phase = EnginePhase::Mounted;
        // The restore trigger runs on every change including the first.
        self.restore_debounce.submit(self.trigger, now);
    }

    /// Feed the current subject data.
    ///
    /// Recomputes the projection; a projection structurally equal to the
    /// previous one is a no-op, so the mount-time baseline makes the very
    /// first render a skipped run. A changed projection is scheduled for
    /// store evaluation through the store debouncer.
    pub fn update(&mut self, data: DraftValue, now: Instant) {
        if self.inert || self.phase == EnginePhase::Idle {
            return;
        }
        let projected = project(&data, self.required.as_deref());
        self.data = data;
        if projected == self.projected {
            return;
        }
        self.projected = projected;
        self.phase = EnginePhase::Watching;
        self.store_debounce.submit(self.projected.clone(), now);
    }

    /// Change the restore trigger condition.
    ///
    /// Changes are coalesced through the restore debouncer; setting the
    /// current value again is a no-op.
    pub fn set_restore_when(&mut self, on: bool, now: Instant) {
        if self.inert || self.phase == EnginePhase::Idle {
            return;
        }
        if on == self.trigger {
            return;
        }
        self.trigger = on;
        self.restore_debounce.submit(on, now);
    }

    /// Drain due debounce timers and perform their evaluations.
    pub fn tick(&mut self, now: Instant) {
        if self.inert {
            return;
        }
        if let Some(projected) = self.store_debounce.poll(now) {
            self.evaluate_store(projected);
        }
        if let Some(trigger) = self.restore_debounce.poll(now) {
            self.evaluate_restore(trigger);
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> EnginePhase {
        self.phase
    }

    /// Whether the engine has degraded (or was constructed) inert.
    #[must_use]
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    /// The storage key this engine persists under.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The last stored draft this engine observed, if any.
    #[must_use]
    pub fn stored(&self) -> Option<&DraftValue> {
        self.stored.as_ref()
    }

    /// Whether a store evaluation is waiting on its quiet window.
    #[must_use]
    pub fn store_pending(&self) -> bool {
        self.store_debounce.is_pending()
    }

    /// Whether a restore evaluation is waiting on its quiet window.
    #[must_use]
    pub fn restore_pending(&self) -> bool {
        self.restore_debounce.is_pending()
    }

    fn read_stored(&self) -> Result<Option<DraftValue>, StorageError> {
        match self.backend.as_ref() {
            Some(backend) => backend.read(&self.key),
            None => Ok(None),
        }
    }

    fn evaluate_store(&mut self, projected: DraftValue) {
        let stored = match self.read_stored() {
            Ok(stored) => stored,
            Err(err) => return self.degrade(err),
        };
        let when = resolve_when(self.store_when, self.top_when);
        if !can_store(&projected, stored.as_ref(), when) {
            self.stored = stored;
            return;
        }
        let Some(backend) = self.backend.as_mut() else {
            return;
        };
        match backend.write(&self.key, &projected) {
            Ok(()) => {
                tracing::debug!(
                    key = %self.key,
                    title = self.title.as_deref().unwrap_or(""),
                    "draft stored"
                );
                self.stored = Some(projected);
            }
            Err(err) => self.degrade(err),
        }
    }

    fn evaluate_restore(&mut self, trigger: bool) {
        if !trigger {
            return;
        }
        let stored = match self.read_stored() {
            Ok(stored) => stored,
            Err(err) => return self.degrade(err),
        };
        self.stored = stored;
        let Some(stored) = self.stored.clone() else {
            return;
        };
        if !can_restore(Some(&stored), &self.projected) {
            return;
        }
        let merged = reconcile(&self.data, &stored);
        if self.test || self.oracle.confirm(&self.prompt) {
            (self.callback)(merged);
        }
    }

    fn degrade(&mut self, err: StorageError) {
        tracing::error!(key = %self.key, error = %err, "draft engine degraded to inert");
        self.inert = true;
    }
}

impl std::fmt::Debug for DraftEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DraftEngine")
            .field("key", &self.key)
            .field("phase", &self.phase)
            .field("inert", &self.inert)
            .field("store_pending", &self.store_debounce.is_pending())
            .field("restore_pending", &self.restore_debounce.is_pending())
            .finish()
    }
}
