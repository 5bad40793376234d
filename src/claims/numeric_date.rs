//! Lenient decoding of NumericDate claims (`exp`, `nbf`, `iat`)
//!
//! JSON has a single number type, so some issuers emit `1700000000.0`. A float
//! is accepted only when it has no fractional part and its magnitude fits in
//! the range a binary64 represents exactly.

use crate::limits::MAX_SAFE_INTEGER;
use serde::de::{self, Deserializer, Visitor};
use serde_json::Value;
use std::fmt;

/// Convert a float to whole seconds, rejecting fractions and unsafe magnitudes
pub(crate) fn from_f64(value: f64) -> Option<i64> {
    if !value.is_finite() || value.fract() != 0.0 || value.abs() > MAX_SAFE_INTEGER {
        return None;
    }
    Some(value as i64)
}

/// Convert an arbitrary JSON value to whole seconds
pub(crate) fn from_value(value: &Value) -> Option<i64> {
    let Value::Number(number) = value else {
        return None;
    };
    if let Some(n) = number.as_i64() {
        return Some(n);
    }
    if number.is_u64() {
        return None;
    }
    number.as_f64().and_then(from_f64)
}

struct NumericDateVisitor;

impl<'de> Visitor<'de> for NumericDateVisitor {
    type Value = Option<i64>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a whole number of seconds since the Unix epoch")
    }

    fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Self::Value, D::Error> {
        deserializer.deserialize_any(self)
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
        Ok(Some(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
        i64::try_from(v)
            .map(Some)
            .map_err(|_| E::custom("timestamp out of range"))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
        from_f64(v)
            .map(Some)
            .ok_or_else(|| E::custom("timestamp must be a whole number within 2^53"))
    }
}

/// `deserialize_with` target for optional NumericDate fields
pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    deserializer.deserialize_option(NumericDateVisitor)
}
