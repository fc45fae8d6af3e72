use crate::constants::APPLICATION_JSON;
use http::StatusCode;
use serde_json::Value;

/// What the engine hands back to the transport for every request.
#[derive(Debug, Clone, PartialEq)]
pub struct OutgoingResponse {
    pub status: StatusCode,
    /// `None` means an empty body.
    pub body: Option<Value>,
}

impl OutgoingResponse {
    /// `200 OK` with a body, `204 No Content` without one.
    pub fn success(body: Option<Value>) -> Self {
        let status = match body {
            Some(_) => StatusCode::OK,
            None => StatusCode::NO_CONTENT,
        };
        Self { status, body }
    }

    pub fn error(status: StatusCode, envelope: Value) -> Self {
        Self {
            status,
            body: Some(envelope),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// The content type to advertise, if the response carries a body.
    pub fn content_type(&self) -> Option<&'static str> {
        self.body.as_ref().map(|_| APPLICATION_JSON)
    }

    /// Serialized body bytes; empty when there is no body.
    pub fn body_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        match &self.body {
            Some(body) => serde_json::to_vec(body),
            None => Ok(Vec::new()),
        }
    }
}
