use super::MarshalError;
use crate::constants::{
    ENVELOPE_DETAILS_KEY, ENVELOPE_ERROR_KEY, ENVELOPE_MESSAGE_KEY, ENVELOPE_STACK_KEY,
    ENVELOPE_STATUS_CODE_KEY,
};
use crate::response::OutgoingResponse;
use http::StatusCode;
use serde_json::{Map, Value, json};

/// Uniform wire representation of a failed request:
///
/// ```json
/// { "error": { "message": "...", "statusCode": 400 } }
/// ```
///
/// `stack` and `details` are added only in debug mode. Outside debug mode,
/// server-side failures carry the generic reason phrase of their status
/// instead of the raw error message.
#[derive(Debug, Clone, PartialEq)]
pub struct ErrorEnvelope {
    pub status: StatusCode,
    pub message: String,
    pub stack: Option<String>,
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    pub fn build(err: &MarshalError, debug: bool) -> Self {
        let status = err.status_code();

        let message = if debug || err.is_client_error() {
            err.to_string()
        } else {
            generic_message(status)
        };

        let (stack, details) = if debug { debug_fields(err) } else { (None, None) };

        Self {
            status,
            message,
            stack,
            details,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut inner = Map::new();
        inner.insert(ENVELOPE_MESSAGE_KEY.into(), json!(self.message));
        inner.insert(ENVELOPE_STATUS_CODE_KEY.into(), json!(self.status.as_u16()));
        if let Some(stack) = &self.stack {
            inner.insert(ENVELOPE_STACK_KEY.into(), json!(stack));
        }
        if let Some(details) = &self.details {
            inner.insert(ENVELOPE_DETAILS_KEY.into(), details.clone());
        }

        let mut outer = Map::new();
        outer.insert(ENVELOPE_ERROR_KEY.into(), Value::Object(inner));
        Value::Object(outer)
    }

    pub fn into_response(self) -> OutgoingResponse {
        OutgoingResponse::error(self.status, self.to_json())
    }
}

fn generic_message(status: StatusCode) -> String {
    status
        .canonical_reason()
        .unwrap_or("Internal Server Error")
        .to_string()
}

fn debug_fields(err: &MarshalError) -> (Option<String>, Option<Value>) {
    match err {
        MarshalError::Validation(validation) => (
            None,
            Some(json!({
                "argument": validation.argument,
                "reason": validation.reason.code(),
            })),
        ),
        MarshalError::Invocation(invocation) => {
            (invocation.stack.clone(), invocation.details.clone())
        }
        MarshalError::MethodNotFound(name) => (None, Some(json!({ "method": name }))),
        MarshalError::MalformedBody(message) | MarshalError::Serialization(message) => {
            (None, Some(json!({ "cause": message })))
        }
    }
}
