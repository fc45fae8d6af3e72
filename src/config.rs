use crate::constants::DEBUG_ENV_VAR;

/// Engine-wide settings shared by every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemotingConfig {
    /// When set, error envelopes carry the raw error message of invocation
    /// failures plus `stack` and `details` fields.
    pub debug: bool,
}

impl RemotingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    /// Builds a config from the process environment.
    ///
    /// Unset or unrecognized values leave the default in place.
    pub fn from_env() -> Self {
        let debug = std::env::var(DEBUG_ENV_VAR)
            .map(|value| parse_flag(&value))
            .unwrap_or(false);

        Self { debug }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
