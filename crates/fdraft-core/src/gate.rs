#![forbid(unsafe_code)]

//! Store and restore gates, plus the shared `when`-condition resolution.
//!
//! # Invariants
//!
//! 1. `can_store` never passes when the projected data structurally equals
//!    the stored data, regardless of validity or conditions.
//! 2. An explicitly supplied falsy `when` — scoped or top-level — vetoes a
//!    store even for valid, different data.
//! 3. `can_restore` never passes when nothing has been stored.
//! 4. Both gates compare by structural equality, never identity.

use crate::validity::is_meaningful;
use crate::value::DraftValue;

/// Resolve a two-level `when` condition.
///
/// First applicable wins: an explicitly supplied scoped `when` (even
/// `Some(false)`), else an explicitly supplied top-level `when`, else `true`.
/// `None` means the field was absent, not falsy — which is why the type is
/// `Option<bool>` rather than `bool`.
#[must_use]
pub fn resolve_when(scoped: Option<bool>, top_level: Option<bool>) -> bool {
    scoped.or(top_level).unwrap_or(true)
}

/// Whether the projected data should be written over the stored data.
///
/// True iff the projection is meaningful, structurally different from what
/// is stored (absent stored data counts as different), and the resolved
/// `when` condition holds.
#[must_use]
pub fn can_store(projected: &DraftValue, stored: Option<&DraftValue>, when: bool) -> bool {
    is_meaningful(projected) && stored != Some(projected) && when
}

/// Whether stored data is worth offering back to the caller.
///
/// True iff something is stored, it is truthy, and it differs structurally
/// from the current projection.
#[must_use]
pub fn can_restore(stored: Option<&DraftValue>, projected: &DraftValue) -> bool {
    stored.is_some_and(|s| s.is_truthy() && s != projected)
}
