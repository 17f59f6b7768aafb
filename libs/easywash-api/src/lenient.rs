//! Lenient scalar decoding
//!
//! The service mixes JSON numbers and numeric strings for the same field, so
//! machine records are decoded through these helpers.

use chrono::NaiveDateTime;
use serde::de::{self, Deserialize, Deserializer};
use serde_json::Value;

/// Timestamp format of `zeitstempel.date`, fractional seconds optional
pub const SERVICE_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

fn value_to_int<E: de::Error>(value: &Value) -> Result<i64, E> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
            .ok_or_else(|| E::custom(format!("expected an integer, got {}", n))),
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| E::custom(format!("expected an integer, got {:?}", s))),
        Value::Bool(b) => Ok(i64::from(*b)),
        other => Err(E::custom(format!("expected an integer, got {}", other))),
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Integer given either as number, numeric string or boolean
pub fn int<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    value_to_int(&value)
}

/// Like [`int`], but `null` decodes to `None`
pub fn opt_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => value_to_int(&value).map(Some),
    }
}

/// Any scalar rendered as text, strings without quotes
pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_text(&value))
}

/// Like [`text`], but `null` decodes to `None`
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        value => Ok(Some(value_to_text(&value))),
    }
}

/// Service-local timestamp without timezone
pub fn service_time<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(raw.trim(), SERVICE_TIME_FORMAT)
        .map_err(|e| de::Error::custom(format!("invalid timestamp {:?}: {}", raw, e)))
}
