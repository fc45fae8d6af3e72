// Date wire convention
pub const DATE_TYPE_KEY: &str = "$type";
pub const DATE_DATA_KEY: &str = "$data";
pub const DATE_TYPE_TAG: &str = "date";

/// Content type attached to every non-empty response body.
pub const APPLICATION_JSON: &str = "application/json";

/// Environment variable read by [`crate::RemotingConfig::from_env`].
///
/// `1`, `true`, `yes` or `on` (any case) enables debug envelopes.
pub const DEBUG_ENV_VAR: &str = "REMOTING_DEBUG";

/// Default HTTP verb for methods that do not declare one.
pub const DEFAULT_HTTP_VERB: &str = "POST";

/// Error envelope field names.
pub const ENVELOPE_ERROR_KEY: &str = "error";
pub const ENVELOPE_MESSAGE_KEY: &str = "message";
pub const ENVELOPE_STATUS_CODE_KEY: &str = "statusCode";
pub const ENVELOPE_STACK_KEY: &str = "stack";
pub const ENVELOPE_DETAILS_KEY: &str = "details";
