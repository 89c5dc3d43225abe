//! Field-level tolerance for wire documents
//!
//! Used through `#[serde(deserialize_with = ...)]` so a field of the wrong
//! JSON type reads as absent instead of failing the document around it.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Deserialize an optional field, mapping a value of the wrong type to `None`
pub(crate) fn option<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| serde_json::from_value(value).ok()))
}

/// Deserialize an optional list, dropping the elements that do not fit `T`
///
/// A value that is not an array at all reads as `None`.
pub(crate) fn items<'de, D, T>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Array(values)) => Ok(Some(
            values
                .into_iter()
                .filter_map(|value| serde_json::from_value(value).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}
