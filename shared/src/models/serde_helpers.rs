//! Serde helpers for request payloads
//!
//! The assignment update payload must distinguish three cases per field:
//! the key is absent (leave the column alone), the key is `null` (clear
//! the column), or the key carries a value (set it). Plain `Option<T>`
//! collapses the first two, so optional-clearable fields are declared as
//! `Option<Option<T>>` with [`double_option`].

use serde::{Deserialize, Deserializer};

/// Deserialize into `Some(inner)` whenever the key is present, so that
/// `#[serde(default)]` (key absent) stays distinguishable from an
/// explicit `null`.
pub fn double_option<'de, T, D>(de: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(de).map(Some)
}

/// Tri-state view of an optional-clearable field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    /// Key absent: keep the stored value.
    Unchanged,
    /// Key present as null: clear the stored value.
    Clear,
    /// Key present with a value: overwrite.
    Set(T),
}

impl<T> From<Option<Option<T>>> for FieldUpdate<T> {
    fn from(raw: Option<Option<T>>) -> Self {
        match raw {
            None => FieldUpdate::Unchanged,
            Some(None) => FieldUpdate::Clear,
            Some(Some(v)) => FieldUpdate::Set(v),
        }
    }
}

impl<T> FieldUpdate<T> {
    /// Resolve against the currently stored value.
    pub fn resolve(self, current: Option<T>) -> Option<T> {
        match self {
            FieldUpdate::Unchanged => current,
            FieldUpdate::Clear => None,
            FieldUpdate::Set(v) => Some(v),
        }
    }

    pub fn is_unchanged(&self) -> bool {
        matches!(self, FieldUpdate::Unchanged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Payload {
        #[serde(default, deserialize_with = "double_option")]
        trainer_id: Option<Option<i64>>,
    }

    #[test]
    fn absent_key_is_unchanged() {
        let p: Payload = serde_json::from_str("{}").unwrap();
        assert_eq!(FieldUpdate::from(p.trainer_id), FieldUpdate::Unchanged);
    }

    #[test]
    fn null_key_is_clear() {
        let p: Payload = serde_json::from_str(r#"{"trainer_id": null}"#).unwrap();
        assert_eq!(FieldUpdate::from(p.trainer_id), FieldUpdate::<i64>::Clear);
    }

    #[test]
    fn value_key_is_set() {
        let p: Payload = serde_json::from_str(r#"{"trainer_id": 42}"#).unwrap();
        assert_eq!(FieldUpdate::from(p.trainer_id), FieldUpdate::Set(42));
    }

    #[test]
    fn resolve_semantics() {
        assert_eq!(FieldUpdate::Unchanged.resolve(Some(1)), Some(1));
        assert_eq!(FieldUpdate::<i64>::Clear.resolve(Some(1)), None);
        assert_eq!(FieldUpdate::Set(2).resolve(Some(1)), Some(2));
    }
}
