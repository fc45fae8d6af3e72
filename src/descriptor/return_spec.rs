use super::{ArgType, DescriptorError};
use serde_json::Value;

/// Declared shape of a return value.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDecl {
    Named(ArgType),
    /// Declared as a one-element JSON array, e.g. `["number"]`.
    Array(Box<TypeDecl>),
    /// Anonymous mapping of field name to nested type. Descriptions are
    /// documentation only and never reach the wire.
    Structural(Vec<FieldDecl>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub type_decl: TypeDecl,
    pub description: Option<String>,
}

impl TypeDecl {
    /// Parses a type declaration: a type name, a one-element array, or an
    /// object mapping field names to `{type, description}` (or to a bare type).
    pub fn from_json(value: &Value) -> Result<Self, DescriptorError> {
        match value {
            Value::String(name) => Ok(TypeDecl::Named(ArgType::parse(name))),
            Value::Array(items) => match items.as_slice() {
                [] => Ok(TypeDecl::Array(Box::new(TypeDecl::Named(ArgType::Any)))),
                [inner] => Ok(TypeDecl::Array(Box::new(TypeDecl::from_json(inner)?))),
                _ => Err(DescriptorError::InvalidType(value.to_string())),
            },
            Value::Object(fields) => fields
                .iter()
                .map(|(name, field)| FieldDecl::from_json(name, field))
                .collect::<Result<Vec<_>, _>>()
                .map(TypeDecl::Structural),
            _ => Err(DescriptorError::InvalidType(value.to_string())),
        }
    }

    pub fn is_date(&self) -> bool {
        matches!(self, TypeDecl::Named(ArgType::Date))
    }
}

impl FieldDecl {
    fn from_json(name: &str, value: &Value) -> Result<Self, DescriptorError> {
        let (type_decl, description) = match value {
            Value::Object(map) if map.contains_key("type") => {
                let type_decl = map
                    .get("type")
                    .map(TypeDecl::from_json)
                    .transpose()?
                    .unwrap_or(TypeDecl::Named(ArgType::Any));
                let description = map
                    .get("description")
                    .and_then(Value::as_str)
                    .map(str::to_string);
                (type_decl, description)
            }
            other => (TypeDecl::from_json(other)?, None),
        };

        Ok(FieldDecl {
            name: name.to_string(),
            type_decl,
            description,
        })
    }
}

impl From<ArgType> for TypeDecl {
    fn from(arg_type: ArgType) -> Self {
        TypeDecl::Named(arg_type)
    }
}

/// Declared contract for one output value of a method.
#[derive(Debug, Clone, PartialEq)]
pub struct ReturnSpec {
    pub name: String,
    pub type_decl: TypeDecl,

    /// The value becomes the entire response body instead of a named field.
    pub root: bool,

    pub description: Option<String>,
}

impl ReturnSpec {
    pub fn new(name: impl Into<String>, type_decl: impl Into<TypeDecl>) -> Self {
        Self {
            name: name.into(),
            type_decl: type_decl.into(),
            root: false,
            description: None,
        }
    }

    pub fn root(mut self) -> Self {
        self.root = true;
        self
    }

    pub fn with_root(mut self, root: bool) -> Self {
        self.root = root;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}
