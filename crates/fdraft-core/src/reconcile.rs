#![forbid(unsafe_code)]

//! Shallow reconciliation of stored data over fresh data.
//!
//! The overlay direction is the counter-intuitive part of the whole engine:
//! **stored wins**. Restoring means putting what the user previously drafted
//! back on top of whatever the caller currently holds, so overlapping
//! top-level keys take the stored value, and keys unique to the fresh side
//! survive. Nothing is merged below the top level.

use crate::value::DraftValue;

/// Overlay `stored` onto `fresh`, shallowly.
///
/// When both are objects, the result is the key union with stored values
/// winning on overlap. Otherwise the stored value replaces the fresh one
/// wholesale.
#[must_use]
pub fn reconcile(fresh: &DraftValue, stored: &DraftValue) -> DraftValue {
    match (fresh, stored) {
        (DraftValue::Object(base), DraftValue::Object(overlay)) => {
            let mut merged = base.clone();
            merged.extend(overlay.iter().map(|(k, v)| (k.clone(), v.clone())));
            DraftValue::Object(merged)
        }
        _ => stored.clone(),
    }
}
