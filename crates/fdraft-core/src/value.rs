#![forbid(unsafe_code)]

//! Owned value model for watched draft data.
//!
//! [`DraftValue`] covers every shape the engine watches: scalars, arrays,
//! plain records (`Object`), keyed collections (`Map`), and set-like
//! collections (`Set`). The distinction between `Object` and `Map` matters:
//! the validity checker inspects object contents recursively but only checks
//! a map's size, so conflating them would silently change which data is
//! eligible for storage.
//!
//! Objects and maps use [`BTreeMap`], so derived equality is key-order
//! insensitive; arrays and sets compare in insertion order.
//!
//! # Example
//!
//! ```
//! use fdraft_core::DraftValue;
//!
//! let form = DraftValue::object([
//!     ("name", DraftValue::from("ada")),
//!     ("age", DraftValue::from(36)),
//! ]);
//! assert!(form.is_truthy());
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A watched value of arbitrary shape.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub enum DraftValue {
    /// Absent or cleared value. Also stands in for missing projected keys.
    #[default]
    Null,
    /// Boolean scalar.
    Bool(bool),
    /// Numeric scalar.
    Number(f64),
    /// String scalar.
    Text(String),
    /// Ordered sequence; equality is order-sensitive.
    Array(Vec<DraftValue>),
    /// Plain record; validity inspects every field recursively.
    Object(BTreeMap<String, DraftValue>),
    /// Keyed collection; validity only checks that it is non-empty.
    Map(BTreeMap<String, DraftValue>),
    /// Set-like collection; validity only checks that it is non-empty.
    Set(Vec<DraftValue>),
}

impl DraftValue {
    /// Build an object from `(key, value)` pairs.
    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DraftValue)>,
    {
        Self::Object(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    /// Build a keyed collection from `(key, value)` pairs.
    pub fn map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, DraftValue)>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v))
                .collect(),
        )
    }

    /// Build an array from values.
    pub fn array<I: IntoIterator<Item = DraftValue>>(items: I) -> Self {
        Self::Array(items.into_iter().collect())
    }

    /// Build a set-like collection from values, in insertion order.
    pub fn set<I: IntoIterator<Item = DraftValue>>(items: I) -> Self {
        Self::Set(items.into_iter().collect())
    }

    /// Scalar truthiness, with containers always truthy as values.
    ///
    /// `Null` is falsy; `Bool` is its value; a `Number` is truthy unless it
    /// is zero or NaN; `Text` is truthy unless empty. Arrays, objects, maps,
    /// and sets are truthy regardless of contents — emptiness is a validity
    /// concern, not a truthiness one.
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Null => false,
            Self::Bool(b) => *b,
            Self::Number(n) => *n != 0.0 && !n.is_nan(),
            Self::Text(s) => !s.is_empty(),
            Self::Array(_) | Self::Object(_) | Self::Map(_) | Self::Set(_) => true,
        }
    }

    /// Whether this value is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Borrow the fields of an `Object`, if this is one.
    #[must_use]
    pub fn as_object(&self) -> Option<&BTreeMap<String, DraftValue>> {
        match self {
            Self::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl From<bool> for DraftValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for DraftValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for DraftValue {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<&str> for DraftValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_owned())
    }
}

impl From<String> for DraftValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<serde_json::Value> for DraftValue {
    /// Map JSON into the value model. JSON has no map or set shapes, so
    /// objects arrive as `Object` and arrays as `Array`; numbers outside
    /// `f64` range lose precision the same way they would in JSON transit.
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Self::Null,
            serde_json::Value::Bool(b) => Self::Bool(b),
            serde_json::Value::Number(n) => Self::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Self::Text(s),
            serde_json::Value::Array(items) => {
                Self::Array(items.into_iter().map(Self::from).collect())
            }
            serde_json::Value::Object(fields) => Self::Object(
                fields
                    .into_iter()
                    .map(|(k, v)| (k, Self::from(v)))
                    .collect(),
            ),
        }
    }
}
