#![forbid(unsafe_code)]

//! Required-fields projection of subject data.
//!
//! Projection decides which part of the watched data is compared against the
//! stored draft and, when eligible, written out. Only objects are filtered;
//! every other shape passes through whole.

use std::collections::BTreeMap;

use crate::value::DraftValue;

/// Derive the comparison/storage view of `data`.
///
/// If `data` is an object and `required` names at least one field, the result
/// is a new object containing exactly those fields. A required field missing
/// from `data` appears as an explicit `Null` entry rather than being omitted,
/// so the projected shape is stable across renders and a vanished field still
/// registers as a change.
///
/// For any other combination the data is returned unchanged.
#[must_use]
pub fn project(data: &DraftValue, required: Option<&[String]>) -> DraftValue {
    match (data, required) {
        (DraftValue::Object(fields), Some(keys)) if !keys.is_empty() => {
            let mut picked = BTreeMap::new();
            for key in keys {
                let value = fields.get(key).cloned().unwrap_or(DraftValue::Null);
                picked.insert(key.clone(), value);
            }
            DraftValue::Object(picked)
        }
        _ => data.clone(),
    }
}
