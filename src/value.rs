//! Values exchanged with target methods.
//!
//! Wire payloads arrive as JSON (or as raw strings from the path, query,
//! headers and form fields). Before a value reaches a target method it is
//! lifted into a [`RemoteValue`], which adds a first-class date variant so
//! that timestamps encoded with the `{"$type": "date", "$data": ...}` wire
//! convention arrive as real [`DateTime`] values.

use crate::constants::{DATE_DATA_KEY, DATE_TYPE_KEY, DATE_TYPE_TAG};
use chrono::{DateTime, NaiveDate, SecondsFormat, TimeZone, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

mod arguments;
pub use arguments::Arguments;

#[derive(Debug, Clone, PartialEq)]
pub enum RemoteValue {
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateTime<Utc>),
    Array(Vec<RemoteValue>),
    /// Keys keep the order they arrived in.
    Object(IndexMap<String, RemoteValue>),
}

/// A date wrapper was recognized but its `$data` could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid date payload: {0}")]
pub struct InvalidDate(pub String);

impl RemoteValue {
    /// Lifts a JSON wire value, decoding every nested date wrapper.
    pub fn from_wire(value: Value) -> Result<Self, InvalidDate> {
        Ok(match value {
            Value::Null => RemoteValue::Null,
            Value::Bool(b) => RemoteValue::Bool(b),
            Value::Number(n) => RemoteValue::Number(n),
            Value::String(s) => RemoteValue::String(s),
            Value::Array(items) => RemoteValue::Array(
                items
                    .into_iter()
                    .map(RemoteValue::from_wire)
                    .collect::<Result<_, _>>()?,
            ),
            Value::Object(map) => {
                if let Some(data) = date_wrapper_data(&map) {
                    return parse_date_value(data).map(RemoteValue::Date);
                }
                RemoteValue::Object(
                    map.into_iter()
                        .map(|(k, v)| RemoteValue::from_wire(v).map(|v| (k, v)))
                        .collect::<Result<_, _>>()?,
                )
            }
        })
    }

    /// Encodes the value for the response body. Dates become ISO-8601 strings.
    pub fn to_json(&self) -> Value {
        match self {
            RemoteValue::Null => Value::Null,
            RemoteValue::Bool(b) => Value::Bool(*b),
            RemoteValue::Number(n) => Value::Number(n.clone()),
            RemoteValue::String(s) => Value::String(s.clone()),
            RemoteValue::Date(d) => Value::String(format_iso8601(d)),
            RemoteValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
            RemoteValue::Object(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect::<Map<_, _>>(),
            ),
        }
    }

    /// Builds a number, folding integral floats into integers so that `3.0`
    /// travels as `3`. Non-finite input becomes `Null`.
    pub fn from_f64(value: f64) -> Self {
        if value.is_finite() && value.fract() == 0.0 && value.abs() < 9_007_199_254_740_992.0 {
            return RemoteValue::Number(Number::from(value as i64));
        }
        Number::from_f64(value)
            .map(RemoteValue::Number)
            .unwrap_or(RemoteValue::Null)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, RemoteValue::Null)
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            RemoteValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            RemoteValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            RemoteValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            RemoteValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            RemoteValue::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[RemoteValue]> {
        match self {
            RemoteValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, RemoteValue>> {
        match self {
            RemoteValue::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Looks up a field of an object value.
    pub fn field(&self, key: &str) -> Option<&RemoteValue> {
        self.as_object().and_then(|map| map.get(key))
    }
}

/// Formats a timestamp the way JavaScript's `Date#toISOString` does.
pub fn format_iso8601(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Parses an RFC 3339 / ISO-8601 timestamp into UTC.
///
/// A bare calendar date (`2015-03-01`) is taken as midnight UTC.
pub fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(date) = DateTime::parse_from_rfc3339(raw) {
        return Some(date.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Interprets a number as milliseconds since the UNIX epoch.
pub fn date_from_epoch_millis(millis: f64) -> Option<DateTime<Utc>> {
    if !millis.is_finite() {
        return None;
    }
    Utc.timestamp_millis_opt(millis as i64).single()
}

fn date_wrapper_data(map: &Map<String, Value>) -> Option<&Value> {
    match map.get(DATE_TYPE_KEY) {
        Some(Value::String(tag)) if tag == DATE_TYPE_TAG => map.get(DATE_DATA_KEY),
        _ => None,
    }
}

fn parse_date_value(data: &Value) -> Result<DateTime<Utc>, InvalidDate> {
    let parsed = match data {
        Value::String(s) => parse_iso8601(s),
        Value::Number(n) => n.as_f64().and_then(date_from_epoch_millis),
        _ => None,
    };
    parsed.ok_or_else(|| InvalidDate(data.to_string()))
}

impl From<Value> for RemoteValue {
    /// Plain structural conversion; date wrappers are left untouched.
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RemoteValue::Null,
            Value::Bool(b) => RemoteValue::Bool(b),
            Value::Number(n) => RemoteValue::Number(n),
            Value::String(s) => RemoteValue::String(s),
            Value::Array(items) => RemoteValue::Array(items.into_iter().map(Into::into).collect()),
            Value::Object(map) => {
                RemoteValue::Object(map.into_iter().map(|(k, v)| (k, v.into())).collect())
            }
        }
    }
}

impl From<&RemoteValue> for Value {
    fn from(value: &RemoteValue) -> Self {
        value.to_json()
    }
}

impl From<bool> for RemoteValue {
    fn from(value: bool) -> Self {
        RemoteValue::Bool(value)
    }
}

impl From<i64> for RemoteValue {
    fn from(value: i64) -> Self {
        RemoteValue::Number(value.into())
    }
}

impl From<i32> for RemoteValue {
    fn from(value: i32) -> Self {
        RemoteValue::Number(value.into())
    }
}

impl From<u64> for RemoteValue {
    fn from(value: u64) -> Self {
        RemoteValue::Number(value.into())
    }
}

impl From<f64> for RemoteValue {
    fn from(value: f64) -> Self {
        RemoteValue::from_f64(value)
    }
}

impl From<String> for RemoteValue {
    fn from(value: String) -> Self {
        RemoteValue::String(value)
    }
}

impl From<&str> for RemoteValue {
    fn from(value: &str) -> Self {
        RemoteValue::String(value.to_string())
    }
}

impl From<DateTime<Utc>> for RemoteValue {
    fn from(value: DateTime<Utc>) -> Self {
        RemoteValue::Date(value)
    }
}

impl<T: Into<RemoteValue>> From<Vec<T>> for RemoteValue {
    fn from(values: Vec<T>) -> Self {
        RemoteValue::Array(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<RemoteValue>> From<Option<T>> for RemoteValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(RemoteValue::Null)
    }
}
