//! Tolerant field deserializers for store documents.
//!
//! The store is schemaless: numbers arrive as strings or floats, and lists or
//! objects arrive as `null`. These helpers map such values to a usable default
//! instead of rejecting the whole snapshot.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    };
    number.filter(|n: &f64| n.is_finite())
}

/// Decodes `T`, falling back to `T::default()` on `null` or a mismatched shape.
pub fn or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(T::default());
    }
    Ok(T::deserialize(&value).unwrap_or_else(|e| {
        tracing::warn!(%value, error = %e, "ignoring malformed field");
        T::default()
    }))
}

/// Decodes a number, also accepting numeric strings. Anything else is 0.
pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_f64(&value).unwrap_or_else(|| {
        if !value.is_null() {
            tracing::warn!(%value, "ignoring non-numeric value");
        }
        0.0
    }))
}

/// Decodes a non-negative whole number, rounding fractions and saturating at
/// `u32::MAX`. Negative or non-numeric values are absent.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn optional_whole<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(as_f64(&value)
        .filter(|n| *n >= 0.0)
        .map(|n| n.round().min(f64::from(u32::MAX)) as u32))
}

/// Like [`optional_whole`], with 0 for absent values.
pub fn whole<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(optional_whole(deserializer)?.unwrap_or_default())
}
