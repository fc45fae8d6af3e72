use http::StatusCode;
use serde_json::Value;

/// Error type returned by target methods.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Why an argument failed resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationReason {
    Missing,
    EmptyString,
    NotANumber,
    NotABoolean,
    NotADate,
    NotAnObject,
    NotAnArray,
    InvalidDate,
}

impl ValidationReason {
    /// Stable machine-readable code.
    pub fn code(&self) -> &'static str {
        match self {
            ValidationReason::Missing => "missing",
            ValidationReason::EmptyString => "empty_string",
            ValidationReason::NotANumber => "not_a_number",
            ValidationReason::NotABoolean => "not_a_boolean",
            ValidationReason::NotADate => "not_a_date",
            ValidationReason::NotAnObject => "not_an_object",
            ValidationReason::NotAnArray => "not_an_array",
            ValidationReason::InvalidDate => "invalid_date",
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            ValidationReason::Missing => "is a required argument",
            ValidationReason::EmptyString => "must not be an empty string",
            ValidationReason::NotANumber => "must be a number",
            ValidationReason::NotABoolean => "must be a boolean",
            ValidationReason::NotADate => "must be a date",
            ValidationReason::NotAnObject => "must be an object",
            ValidationReason::NotAnArray => "must be an array",
            ValidationReason::InvalidDate => "contains an invalid date",
        }
    }
}

/// A request argument was absent, empty, or could not be coerced.
///
/// Always client-caused, so its message is safe to expose.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{argument:?} {}", .reason.describe())]
pub struct ValidationError {
    pub argument: String,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(argument: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            argument: argument.into(),
            reason,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }
}

/// The target method failed, either by returning/panicking synchronously or
/// by rejecting its completion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct InvocationError {
    pub message: String,
    /// Explicit status declared by the failing method, if any.
    pub status_code: Option<StatusCode>,
    /// Error chain (or panic origin), exposed only in debug mode.
    pub stack: Option<String>,
    /// Structured detail, exposed only in debug mode.
    pub details: Option<Value>,
}

impl InvocationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            stack: None,
            details: None,
        }
    }

    /// Converts a handler error, keeping any status or details carried by a
    /// [`RemoteError`] and recording the `source()` chain as the stack.
    pub fn from_error(err: &(dyn std::error::Error + 'static)) -> Self {
        let mut invocation = InvocationError::new(err.to_string());

        if let Some(remote) = err.downcast_ref::<RemoteError>() {
            invocation.status_code = remote.status_code;
            invocation.details = remote.details.clone();
        }

        let mut chain = vec![format!("{err}")];
        let mut source = err.source();
        while let Some(cause) = source {
            chain.push(format!("caused by: {cause}"));
            source = cause.source();
        }
        invocation.stack = Some(chain.join("\n    "));

        if invocation.details.is_none() {
            invocation.details = Some(Value::String(format!("{err:?}")));
        }
        invocation
    }

    pub fn from_panic(payload: &(dyn std::any::Any + Send)) -> Self {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "method panicked".to_string());

        let mut invocation = InvocationError::new(message);
        invocation.stack = Some("panicked inside target method".to_string());
        invocation
    }

    pub fn status_code(&self) -> StatusCode {
        self.status_code
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

/// Error a target method can return to control the envelope it produces.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct RemoteError {
    pub message: String,
    pub status_code: Option<StatusCode>,
    pub details: Option<Value>,
}

impl RemoteError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: None,
            details: None,
        }
    }

    pub fn with_status(mut self, status_code: StatusCode) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Every way a request can fail between arrival and response.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MarshalError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Invocation(#[from] InvocationError),

    #[error("no remote method named {0:?}")]
    MethodNotFound(String),

    /// The transport could not decode the request body.
    #[error("malformed request body: {0}")]
    MalformedBody(String),

    #[error("failed to serialize result: {0}")]
    Serialization(String),
}

impl MarshalError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            MarshalError::Validation(err) => err.status_code(),
            MarshalError::Invocation(err) => err.status_code(),
            MarshalError::MethodNotFound(_) => StatusCode::NOT_FOUND,
            MarshalError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            MarshalError::Serialization(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Whether the failure was caused by the client and may be described
    /// without leaking internals.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            MarshalError::Validation(_)
                | MarshalError::MethodNotFound(_)
                | MarshalError::MalformedBody(_)
        )
    }
}
