use super::ValidationReason;
use crate::descriptor::ArgType;
use crate::value::{RemoteValue, date_from_epoch_millis, parse_iso8601};
use serde_json::Value;

/// Coerces a raw wire value to the declared type.
///
/// `Ok(None)` is the missing marker. Besides an absent key, an empty wire
/// string for a non-string type and a `null` for a primitive type are
/// treated as "not supplied".
pub(crate) fn coerce(
    arg_type: &ArgType,
    raw: Option<&Value>,
) -> Result<Option<RemoteValue>, ValidationReason> {
    let Some(raw) = raw else {
        return Ok(None);
    };

    if raw.is_null() {
        return Ok(arg_type.is_structural().then_some(RemoteValue::Null));
    }

    if *arg_type == ArgType::String {
        return Ok(Some(RemoteValue::from(raw.clone())));
    }

    if let Value::String(s) = raw {
        if s.trim().is_empty() {
            return Ok(None);
        }
    }

    let value = match arg_type {
        ArgType::String => RemoteValue::from(raw.clone()),
        ArgType::Number => coerce_number(raw)?,
        ArgType::Boolean => coerce_boolean(raw)?,
        ArgType::Date => coerce_date(raw)?,
        ArgType::Array => coerce_array(raw)?,
        ArgType::Object | ArgType::Custom(_) => coerce_object(raw)?,
        ArgType::Any => coerce_any(raw)?,
    };
    Ok(Some(value))
}

fn coerce_number(raw: &Value) -> Result<RemoteValue, ValidationReason> {
    match raw {
        Value::Number(n) => Ok(RemoteValue::Number(n.clone())),
        Value::String(s) => parse_number(s).ok_or(ValidationReason::NotANumber),
        _ => Err(ValidationReason::NotANumber),
    }
}

pub(crate) fn parse_number(raw: &str) -> Option<RemoteValue> {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(RemoteValue::from(n));
    }
    if let Ok(n) = trimmed.parse::<u64>() {
        return Some(RemoteValue::from(n));
    }
    // `f64::from_str` also accepts "inf" and "NaN", neither of which is a
    // numeric literal on the wire.
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(RemoteValue::from_f64(n)),
        _ => None,
    }
}

fn coerce_boolean(raw: &Value) -> Result<RemoteValue, ValidationReason> {
    match raw {
        Value::Bool(b) => Ok(RemoteValue::Bool(*b)),
        Value::String(s) if s == "true" => Ok(RemoteValue::Bool(true)),
        Value::String(s) if s == "false" => Ok(RemoteValue::Bool(false)),
        _ => Err(ValidationReason::NotABoolean),
    }
}

fn coerce_date(raw: &Value) -> Result<RemoteValue, ValidationReason> {
    let date = match raw {
        Value::String(s) => parse_iso8601(s)
            .or_else(|| s.trim().parse::<f64>().ok().and_then(date_from_epoch_millis)),
        Value::Number(n) => n.as_f64().and_then(date_from_epoch_millis),
        Value::Object(_) => RemoteValue::from_wire(raw.clone())
            .map_err(|_| ValidationReason::InvalidDate)?
            .as_date()
            .copied(),
        _ => None,
    };
    date.map(RemoteValue::Date).ok_or(ValidationReason::NotADate)
}

fn coerce_array(raw: &Value) -> Result<RemoteValue, ValidationReason> {
    match raw {
        Value::Array(_) => decode(raw.clone()),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed @ Value::Array(_)) => decode(parsed),
            _ => Ok(RemoteValue::Array(vec![RemoteValue::String(s.clone())])),
        },
        Value::Object(_) => Err(ValidationReason::NotAnArray),
        scalar => Ok(RemoteValue::Array(vec![RemoteValue::from(scalar.clone())])),
    }
}

fn coerce_object(raw: &Value) -> Result<RemoteValue, ValidationReason> {
    match raw {
        Value::Object(_) | Value::Array(_) => decode(raw.clone()),
        Value::String(s) => match serde_json::from_str::<Value>(s) {
            Ok(parsed @ (Value::Object(_) | Value::Array(_))) => decode(parsed),
            _ => Err(ValidationReason::NotAnObject),
        },
        _ => Err(ValidationReason::NotAnObject),
    }
}

fn coerce_any(raw: &Value) -> Result<RemoteValue, ValidationReason> {
    if let Value::String(s) = raw {
        let trimmed = s.trim_start();
        if trimmed.starts_with('{') || trimmed.starts_with('[') {
            if let Ok(parsed) = serde_json::from_str::<Value>(s) {
                return decode(parsed);
            }
        }
        return Ok(RemoteValue::String(s.clone()));
    }
    decode(raw.clone())
}

fn decode(value: Value) -> Result<RemoteValue, ValidationReason> {
    RemoteValue::from_wire(value).map_err(|_| ValidationReason::InvalidDate)
}
