use std::fmt;

/// Declared type of an argument or return value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ArgType {
    String,
    Number,
    Boolean,
    Object,
    Any,
    Date,
    Array,
    /// A named model type. Coerced like [`ArgType::Object`].
    Custom(String),
}

impl ArgType {
    /// Parses a declared type name. Matching is case-insensitive and never
    /// fails: unknown names become [`ArgType::Custom`].
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "string" => ArgType::String,
            "number" => ArgType::Number,
            "boolean" => ArgType::Boolean,
            "object" => ArgType::Object,
            "any" | "" => ArgType::Any,
            "date" => ArgType::Date,
            "array" => ArgType::Array,
            _ => ArgType::Custom(name.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ArgType::String => "string",
            ArgType::Number => "number",
            ArgType::Boolean => "boolean",
            ArgType::Object => "object",
            ArgType::Any => "any",
            ArgType::Date => "date",
            ArgType::Array => "array",
            ArgType::Custom(name) => name,
        }
    }

    /// Structural types receive payloads as-is (after date decoding).
    pub fn is_structural(&self) -> bool {
        matches!(self, ArgType::Object | ArgType::Any | ArgType::Custom(_))
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where on the incoming request an argument is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ArgSource {
    Path,
    Query,
    Header,
    Body,
    Form,
    FormData,
    /// No source declared: path, then query, then body field, then form.
    #[default]
    Auto,
}

impl ArgSource {
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim() {
            "path" => Some(ArgSource::Path),
            "query" => Some(ArgSource::Query),
            "header" => Some(ArgSource::Header),
            "body" => Some(ArgSource::Body),
            "form" => Some(ArgSource::Form),
            "formData" => Some(ArgSource::FormData),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ArgSource::Path => "path",
            ArgSource::Query => "query",
            ArgSource::Header => "header",
            ArgSource::Body => "body",
            ArgSource::Form => "form",
            ArgSource::FormData => "formData",
            ArgSource::Auto => "auto",
        }
    }
}

impl fmt::Display for ArgSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
