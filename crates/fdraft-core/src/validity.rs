#![forbid(unsafe_code)]

//! Storage-eligibility check: is a value meaningful enough to persist?
//!
//! The rules are deliberately asymmetric, and the asymmetry is load-bearing:
//!
//! - `Object`: every field must itself be meaningful (an empty object is
//!   vacuously meaningful).
//! - `Array`: non-empty, and every element merely *truthy* — elements are not
//!   checked recursively.
//! - `Map` / `Set`: non-empty; contents are never inspected.
//! - Scalars: truthy.
//!
//! Making arrays recursive, or maps field-aware, would silently change which
//! data shapes ever reach storage.

use crate::value::DraftValue;

/// Whether `value` is non-empty and meaningful enough to persist.
#[must_use]
pub fn is_meaningful(value: &DraftValue) -> bool {
    match value {
        DraftValue::Object(fields) => fields.values().all(is_meaningful),
        DraftValue::Array(items) => !items.is_empty() && items.iter().all(DraftValue::is_truthy),
        DraftValue::Map(entries) => !entries.is_empty(),
        DraftValue::Set(items) => !items.is_empty(),
        scalar => scalar.is_truthy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_vacuously_meaningful() {
        assert!(is_meaningful(&DraftValue::object::<&str, _>([])));
    }

    #[test]
    fn object_requires_every_field_meaningful() {
        let full = DraftValue::object([("a", 1.into()), ("b", "x".into())]);
        assert!(is_meaningful(&full));

        let with_empty_field = DraftValue::object([("a", 1.into()), ("b", "".into())]);
        assert!(!is_meaningful(&with_empty_field));

        let with_null_field = DraftValue::object([("a", DraftValue::Null)]);
        assert!(!is_meaningful(&with_null_field));
    }

    #[test]
    fn object_recurses_into_nested_objects() {
        let nested_bad = DraftValue::object([(
            "inner",
            DraftValue::object([("x", DraftValue::Number(0.0))]),
        )]);
        assert!(!is_meaningful(&nested_bad));
    }

    #[test]
    fn empty_array_is_not_meaningful() {
        assert!(!is_meaningful(&DraftValue::array([])));
    }

    #[test]
    fn array_with_falsy_element_is_not_meaningful() {
        assert!(!is_meaningful(&DraftValue::array([0.into(), 1.into()])));
        assert!(!is_meaningful(&DraftValue::array(["".into()])));
    }

    #[test]
    fn array_elements_are_checked_by_truthiness_not_recursively() {
        // An empty nested array is a truthy element, so the outer array
        // passes even though the inner one would fail on its own.
        let outer = DraftValue::array([DraftValue::array([])]);
        assert!(is_meaningful(&outer));

        // Same for an object with an empty-string field: truthy as an
        // element, not meaningful as an object.
        let element = DraftValue::object([("x", "".into())]);
        assert!(!is_meaningful(&element));
        assert!(is_meaningful(&DraftValue::array([element])));
    }

    #[test]
    fn map_only_checks_size() {
        assert!(!is_meaningful(&DraftValue::map::<&str, _>([])));
        // Contents are unchecked: a map full of falsy values still counts.
        assert!(is_meaningful(&DraftValue::map([("k", DraftValue::Null)])));
    }

    #[test]
    fn set_only_checks_size() {
        assert!(!is_meaningful(&DraftValue::set([])));
        assert!(is_meaningful(&DraftValue::set([DraftValue::Number(0.0)])));
    }

    #[test]
    fn scalars_follow_truthiness() {
        assert!(!is_meaningful(&DraftValue::Null));
        assert!(!is_meaningful(&DraftValue::Bool(false)));
        assert!(is_meaningful(&DraftValue::Bool(true)));
        assert!(!is_meaningful(&DraftValue::Number(0.0)));
        assert!(is_meaningful(&DraftValue::from("draft")));
    }
}
