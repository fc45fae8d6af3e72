use super::{ArgSource, ArgType};

/// Declared contract for one method argument.
#[derive(Debug, Clone, PartialEq)]
pub struct ArgSpec {
    pub name: String,
    pub arg_type: ArgType,
    pub source: ArgSource,
    pub required: bool,

    /// Key used at the source when it differs from `name`. For `body`
    /// arguments this is the field name mapping; when it is absent and the
    /// argument is the only body-sourced one, it receives the whole body.
    pub wire_name: Option<String>,

    pub description: Option<String>,
}

impl ArgSpec {
    pub fn new(name: impl Into<String>, arg_type: ArgType, source: ArgSource) -> Self {
        Self {
            name: name.into(),
            arg_type,
            source,
            required: false,
            wire_name: None,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_wire_name(mut self, wire_name: impl Into<String>) -> Self {
        self.wire_name = Some(wire_name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// The key looked up at the argument's source.
    pub fn lookup_key(&self) -> &str {
        self.wire_name.as_deref().unwrap_or(&self.name)
    }
}
