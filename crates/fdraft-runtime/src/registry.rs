#![forbid(unsafe_code)]

//! Duplicate-key registry for live engine instances.
//!
//! Two engines persisting under the same key would silently clobber each
//! other's drafts, so every engine registers its key at mount and the second
//! registration of a key is reported as a [`Registration::Duplicate`] — a
//! diagnosis aid, never an error.
//!
//! The registry is an explicit, injected object rather than a process
//! global: hosts decide its scope by how widely they share it, clones share
//! the underlying set, and [`clear`](KeyRegistry::clear) exists so tests can
//! reset between cases. It is append-only otherwise.

use std::cell::RefCell;
use std::rc::Rc;

use ahash::AHashSet;

/// Outcome of registering a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// The key had not been seen before.
    Fresh,
    /// The key is already in use by another registration.
    Duplicate,
}

/// Shared set of draft keys currently in use.
///
/// `Clone` shares the underlying set.
#[derive(Clone, Default)]
pub struct KeyRegistry {
    keys: Rc<RefCell<AHashSet<String>>>,
}

impl KeyRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `key` as in use.
    pub fn register(&self, key: &str) -> Registration {
        if self.keys.borrow_mut().insert(key.to_owned()) {
            Registration::Fresh
        } else {
            Registration::Duplicate
        }
    }

    /// Whether `key` has been registered.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.keys.borrow().contains(key)
    }

    /// Number of distinct registered keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys.borrow().len()
    }

    /// Whether no keys are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.keys.borrow().is_empty()
    }

    /// Forget every registered key. Intended for test teardown; the engine
    /// never calls this.
    pub fn clear(&self) {
        self.keys.borrow_mut().clear();
    }
}

impl std::fmt::Debug for KeyRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyRegistry")
            .field("len", &self.keys.borrow().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_registration_is_fresh() {
        let registry = KeyRegistry::new();
        assert_eq!(registry.register("form"), Registration::Fresh);
        assert!(registry.contains("form"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn second_registration_is_duplicate() {
        let registry = KeyRegistry::new();
        registry.register("form");
        assert_eq!(registry.register("form"), Registration::Duplicate);
        assert_eq!(registry.len(), 1, "duplicates do not grow the registry");
    }

    #[test]
    fn clones_share_the_set() {
        let a = KeyRegistry::new();
        let b = a.clone();
        a.register("form");
        assert_eq!(b.register("form"), Registration::Duplicate);
    }

    #[test]
    fn distinct_registries_do_not_collide() {
        let a = KeyRegistry::new();
        let b = KeyRegistry::new();
        a.register("form");
        assert_eq!(b.register("form"), Registration::Fresh);
    }

    #[test]
    fn clear_resets_between_cases() {
        let registry = KeyRegistry::new();
        registry.register("form");
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.register("form"), Registration::Fresh);
    }
}
