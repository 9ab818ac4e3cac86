//! Tri-state field wrapper for sparse request bodies.
//!
//! A plain `Option<T>` collapses "the key was not sent" and "the key was sent as `null`" into
//! the same `None`. Sparse updates need to keep those apart, so every updatable field is a
//! [`Field<T>`] paired with `#[serde(default)]` on the containing struct:
//!
//! - key missing → [`Field::Absent`] (via `Default`)
//! - key present with `null` → [`Field::Null`]
//! - key present with a value → [`Field::Value`]

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// One field of a sparse update.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum Field<T> {
    /// The key was not present in the request.
    #[default]
    Absent,
    /// The key was present with an explicit `null`.
    Null,
    /// The key was present with a value.
    Value(T),
}

impl<'de, T> Deserialize<'de> for Field<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Only called when the key is present; absence is handled by `#[serde(default)]`.
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Field::Value(value),
            None => Field::Null,
        })
    }
}

/// A value serialises as itself; `Absent` and `Null` both serialise as `null`.
impl<T> Serialize for Field<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Field::Value(value) => serializer.serialize_some(value),
            Field::Absent | Field::Null => serializer.serialize_none(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Deserialize)]
    struct WeightBody {
        #[serde(default)]
        weight: Field<f64>,
    }

    #[test]
    fn test_missing_key_is_absent() {
        let body: WeightBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.weight, Field::Absent);
    }

    #[test]
    fn test_explicit_null_is_null() {
        let body: WeightBody = serde_json::from_str(r#"{"weight": null}"#).unwrap();
        assert_eq!(body.weight, Field::Null);
    }

    #[test]
    fn test_zero_is_a_provided_value() {
        let body: WeightBody = serde_json::from_str(r#"{"weight": 0.0}"#).unwrap();
        assert_eq!(body.weight, Field::Value(0.0));
    }

    #[test]
    fn test_serialises_value_or_null() {
        assert_eq!(serde_json::to_value(Field::Value(72.5)).unwrap(), 72.5);
        assert!(serde_json::to_value(Field::<f64>::Null).unwrap().is_null());
        assert!(serde_json::to_value(Field::<f64>::Absent).unwrap().is_null());
    }
}
