use crate::descriptor::{MethodDescriptor, ReturnSpec, TypeDecl};
use crate::value::{RemoteValue, date_from_epoch_millis, format_iso8601, parse_iso8601};
use serde_json::{Map, Value};

/// Maps a method's output values onto a response body.
pub struct ResultSerializer;

impl ResultSerializer {
    /// Output `i` pairs with `returns[i]`.
    ///
    /// - A single `root` spec makes its value the whole body.
    /// - Otherwise the body is an object keyed by spec name, in spec order.
    ///   Specs without a matching value are omitted; surplus values are ignored.
    /// - No specs yields no body.
    pub fn serialize(descriptor: &MethodDescriptor, outputs: &[RemoteValue]) -> Option<Value> {
        let returns = descriptor.returns();

        if let Some((index, spec)) = descriptor.root_return() {
            return outputs.get(index).map(|value| encode(spec, value));
        }

        if returns.is_empty() {
            return None;
        }

        let body = returns
            .iter()
            .zip(outputs)
            .map(|(spec, value)| (spec.name.clone(), encode(spec, value)))
            .collect::<Map<_, _>>();

        Some(Value::Object(body))
    }
}

fn encode(spec: &ReturnSpec, value: &RemoteValue) -> Value {
    encode_as(&spec.type_decl, value)
}

/// Structural type metadata is documentation only: values are emitted as
/// plain JSON, with `date` declarations normalized to ISO-8601 strings.
fn encode_as(type_decl: &TypeDecl, value: &RemoteValue) -> Value {
    match (type_decl, value) {
        (TypeDecl::Named(_), _) if type_decl.is_date() => encode_date(value),
        (TypeDecl::Array(inner), RemoteValue::Array(items)) => {
            Value::Array(items.iter().map(|item| encode_as(inner, item)).collect())
        }
        (TypeDecl::Structural(fields), RemoteValue::Object(map)) => {
            let mut out = Map::new();
            for (key, field_value) in map {
                let encoded = match fields.iter().find(|field| &field.name == key) {
                    Some(field) => encode_as(&field.type_decl, field_value),
                    None => field_value.to_json(),
                };
                out.insert(key.clone(), encoded);
            }
            Value::Object(out)
        }
        _ => value.to_json(),
    }
}

fn encode_date(value: &RemoteValue) -> Value {
    let date = match value {
        RemoteValue::Date(d) => Some(*d),
        RemoteValue::Number(n) => n.as_f64().and_then(date_from_epoch_millis),
        RemoteValue::String(s) => parse_iso8601(s),
        _ => None,
    };
    match date {
        Some(d) => Value::String(format_iso8601(&d)),
        None => value.to_json(),
    }
}
