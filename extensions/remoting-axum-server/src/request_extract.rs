use axum::body::Body;
use axum::extract::{FromRequest, Multipart, Request};
use axum::http::header::CONTENT_TYPE;
use bytes::Bytes;
use percent_encoding::percent_decode_str;
use remoting::marshal::MarshalError;
use remoting::request::RequestParts;
use serde_json::{Map, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BodyKind {
    Json,
    UrlEncoded,
    Multipart,
    Other,
}

/// Builds the engine's view of an HTTP request.
///
/// `path_params` are the raw segments captured by routing; they are
/// percent-decoded here. Bodies are buffered up to `max_body_bytes` and
/// parsed according to `Content-Type`.
pub async fn extract_request(
    request: Request,
    path_params: HashMap<String, String>,
    max_body_bytes: usize,
) -> Result<RequestParts, MarshalError> {
    let mut parts = RequestParts::new();

    for (name, raw) in path_params {
        parts.insert_path_param(name, percent_decode_str(&raw).decode_utf8_lossy());
    }

    if let Some(query) = request.uri().query() {
        match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
            Ok(pairs) => {
                for (name, value) in pairs {
                    parts.insert_query(name, value);
                }
            }
            Err(err) => tracing::warn!(error = %err, "ignoring undecodable query string"),
        }
    }

    for (name, value) in request.headers() {
        match value.to_str() {
            Ok(value) => parts.insert_header(name.as_str(), value),
            Err(_) => tracing::debug!(header = %name, "skipping non-ASCII header value"),
        }
    }

    match body_kind(&request) {
        BodyKind::Multipart => read_multipart(request, max_body_bytes, &mut parts).await?,
        kind => {
            let bytes = axum::body::to_bytes(request.into_body(), max_body_bytes)
                .await
                .map_err(|e| MarshalError::MalformedBody(e.to_string()))?;
            read_buffered(kind, bytes, &mut parts)?;
        }
    }

    Ok(parts)
}

fn body_kind(request: &Request) -> BodyKind {
    let Some(content_type) = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
    else {
        return BodyKind::Other;
    };

    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    match essence.as_str() {
        "application/json" => BodyKind::Json,
        "application/x-www-form-urlencoded" => BodyKind::UrlEncoded,
        "multipart/form-data" => BodyKind::Multipart,
        other if other.ends_with("+json") => BodyKind::Json,
        _ => BodyKind::Other,
    }
}

fn read_buffered(kind: BodyKind, bytes: Bytes, parts: &mut RequestParts) -> Result<(), MarshalError> {
    if bytes.is_empty() {
        return Ok(());
    }

    match kind {
        BodyKind::Json => {
            let body = serde_json::from_slice::<Value>(&bytes)
                .map_err(|e| MarshalError::MalformedBody(e.to_string()))?;
            parts.set_body(Some(body));
        }
        BodyKind::UrlEncoded => {
            let pairs = serde_urlencoded::from_bytes::<Vec<(String, String)>>(&bytes)
                .map_err(|e| MarshalError::MalformedBody(e.to_string()))?;
            let mut body = Map::new();
            for (name, value) in pairs {
                push_field(&mut body, &name, &value);
                parts.insert_form(name, value);
            }
            parts.set_body(Some(Value::Object(body)));
        }
        BodyKind::Multipart | BodyKind::Other => {
            tracing::debug!(len = bytes.len(), "ignoring body with unsupported content type");
        }
    }
    Ok(())
}

async fn read_multipart(
    request: Request,
    max_body_bytes: usize,
    parts: &mut RequestParts,
) -> Result<(), MarshalError> {
    let (head, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, max_body_bytes)
        .await
        .map_err(|e| MarshalError::MalformedBody(e.to_string()))?;
    let request = Request::from_parts(head, Body::from(bytes));

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| MarshalError::MalformedBody(e.body_text()))?;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| MarshalError::MalformedBody(e.body_text()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };
        let bytes = field
            .bytes()
            .await
            .map_err(|e| MarshalError::MalformedBody(e.body_text()))?;
        match String::from_utf8(bytes.to_vec()) {
            Ok(value) => parts.insert_form_data(name, value),
            Err(_) => tracing::debug!(
                field = %name,
                len = bytes.len(),
                "skipping non-UTF-8 multipart field"
            ),
        }
    }
    Ok(())
}

fn push_field(body: &mut Map<String, Value>, name: &str, value: &str) {
    let value = Value::String(value.to_string());
    match body.get_mut(name) {
        Some(Value::Array(values)) => values.push(value),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, value]);
        }
        None => {
            body.insert(name.to_string(), value);
        }
    }
}
