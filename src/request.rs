use serde_json::Value;
use std::collections::HashMap;

/// Read-only view of an incoming HTTP request, as delivered by a transport
/// adapter.
///
/// Values taken from the path, query, headers and form fields are wire
/// strings (`Value::String`), or arrays of strings for repeated keys. The
/// body is already parsed: JSON as-is, urlencoded forms as an object of
/// strings.
pub trait IncomingRequest: Send + Sync {
    fn path_param(&self, name: &str) -> Option<&Value>;

    fn query(&self, name: &str) -> Option<&Value>;

    /// Header lookup. Implementations must match names case-insensitively.
    fn header(&self, name: &str) -> Option<&Value>;

    fn body(&self) -> Option<&Value>;

    /// Urlencoded form field.
    fn form(&self, name: &str) -> Option<&Value>;

    /// Multipart form field.
    fn form_data(&self, name: &str) -> Option<&Value>;
}

/// Owned, in-memory [`IncomingRequest`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestParts {
    path_params: HashMap<String, Value>,
    query: HashMap<String, Value>,
    headers: HashMap<String, Value>,
    body: Option<Value>,
    form: HashMap<String, Value>,
    form_data: HashMap<String, Value>,
}

impl RequestParts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_path_param(name, value);
        self
    }

    /// Repeated names accumulate into an array of strings.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_query(name, value);
        self
    }

    pub fn with_header(mut self, name: impl AsRef<str>, value: impl Into<String>) -> Self {
        self.insert_header(name, value);
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_form(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_form(name, value);
        self
    }

    pub fn with_form_data(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert_form_data(name, value);
        self
    }

    pub fn insert_path_param(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.path_params
            .insert(name.into(), Value::String(value.into()));
    }

    pub fn insert_query(&mut self, name: impl Into<String>, value: impl Into<String>) {
        accumulate(&mut self.query, name.into(), value.into());
    }

    pub fn insert_header(&mut self, name: impl AsRef<str>, value: impl Into<String>) {
        accumulate(
            &mut self.headers,
            name.as_ref().to_ascii_lowercase(),
            value.into(),
        );
    }

    pub fn insert_form(&mut self, name: impl Into<String>, value: impl Into<String>) {
        accumulate(&mut self.form, name.into(), value.into());
    }

    pub fn insert_form_data(&mut self, name: impl Into<String>, value: impl Into<String>) {
        accumulate(&mut self.form_data, name.into(), value.into());
    }

    pub fn set_body(&mut self, body: Option<Value>) {
        self.body = body;
    }
}

fn accumulate(map: &mut HashMap<String, Value>, name: String, value: String) {
    match map.get_mut(&name) {
        Some(Value::Array(values)) => values.push(Value::String(value)),
        Some(existing) => {
            let first = existing.take();
            *existing = Value::Array(vec![first, Value::String(value)]);
        }
        None => {
            map.insert(name, Value::String(value));
        }
    }
}

impl IncomingRequest for RequestParts {
    fn path_param(&self, name: &str) -> Option<&Value> {
        self.path_params.get(name)
    }

    fn query(&self, name: &str) -> Option<&Value> {
        self.query.get(name)
    }

    fn header(&self, name: &str) -> Option<&Value> {
        self.headers.get(&name.to_ascii_lowercase())
    }

    fn body(&self) -> Option<&Value> {
        self.body.as_ref()
    }

    fn form(&self, name: &str) -> Option<&Value> {
        self.form.get(name)
    }

    fn form_data(&self, name: &str) -> Option<&Value> {
        self.form_data.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn header_lookup_ignores_case() {
        let request = RequestParts::new().with_header("X-Request-Id", "abc");
        assert_eq!(request.header("x-request-id"), Some(&json!("abc")));
        assert_eq!(request.header("X-REQUEST-ID"), Some(&json!("abc")));
    }

    #[test]
    fn repeated_query_keys_collect_into_array() {
        let request = RequestParts::new()
            .with_query("tag", "a")
            .with_query("tag", "b")
            .with_query("tag", "c");
        assert_eq!(request.query("tag"), Some(&json!(["a", "b", "c"])));
    }
}
