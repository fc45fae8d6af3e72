//! Declarative (JSON) method descriptions.
//!
//! `accepts` and `returns` may each be given as a single object or as an
//! array of objects. Both shapes are normalized here into the ordered spec
//! lists of [`MethodDescriptor`], so nothing downstream ever distinguishes
//! "one spec" from "many specs".
//!
//! ```json
//! {
//!   "accepts": [
//!     { "arg": "a", "type": "number", "required": true, "http": { "source": "path" } },
//!     { "arg": "b", "type": "number", "http": { "source": "query" } }
//!   ],
//!   "returns": { "arg": "sum", "type": "number" },
//!   "http": { "verb": "get", "path": "/add/:a" }
//! }
//! ```

use super::{
    ArgSource, ArgSpec, ArgType, DescriptorError, MethodDescriptor, ReturnSpec, TypeDecl,
};
use http::Method;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MethodDeclaration {
    #[serde(default)]
    pub accepts: Option<OneOrMany<ArgDeclaration>>,
    #[serde(default)]
    pub returns: Option<OneOrMany<ReturnDeclaration>>,
    #[serde(default)]
    pub http: Option<HttpDeclaration>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ArgDeclaration {
    #[serde(alias = "name")]
    pub arg: String,
    #[serde(rename = "type", default)]
    pub arg_type: Option<Value>,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub http: Option<ArgHttpDeclaration>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArgHttpDeclaration {
    #[serde(default)]
    pub source: Option<String>,
    /// Wire key when it differs from the argument name.
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReturnDeclaration {
    #[serde(alias = "name")]
    pub arg: String,
    #[serde(rename = "type", default)]
    pub return_type: Option<Value>,
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpDeclaration {
    #[serde(default)]
    pub verb: Option<String>,
    #[serde(default)]
    pub path: Option<String>,
}

impl MethodDescriptor {
    /// Builds a descriptor from its JSON declaration.
    pub fn from_declaration(name: &str, declaration: &Value) -> Result<Self, DescriptorError> {
        let declaration: MethodDeclaration = serde_json::from_value(declaration.clone())
            .map_err(|e| DescriptorError::Malformed(e.to_string()))?;
        declaration.into_descriptor(name)
    }
}

impl MethodDeclaration {
    pub fn into_descriptor(self, name: &str) -> Result<MethodDescriptor, DescriptorError> {
        let mut builder = MethodDescriptor::builder(name);

        for arg in self.accepts.map(OneOrMany::into_vec).unwrap_or_default() {
            builder = builder.accepts(arg.into_spec()?);
        }
        for ret in self.returns.map(OneOrMany::into_vec).unwrap_or_default() {
            builder = builder.returns(ret.into_spec()?);
        }

        if let Some(http) = self.http {
            if let Some(verb) = http.verb {
                builder = match parse_verb(&verb)? {
                    Some(method) => builder.verb(method),
                    None => builder.any_verb(),
                };
            }
            if let Some(path) = http.path {
                builder = builder.path(path);
            }
        }

        builder.build()
    }
}

impl ArgDeclaration {
    fn into_spec(self) -> Result<ArgSpec, DescriptorError> {
        let arg_type = match &self.arg_type {
            None => ArgType::Any,
            Some(Value::String(name)) => ArgType::parse(name),
            Some(Value::Array(_)) => ArgType::Array,
            Some(Value::Object(_)) => ArgType::Object,
            Some(other) => return Err(DescriptorError::InvalidType(other.to_string())),
        };

        let http = self.http.unwrap_or_default();
        let source = match http.source.as_deref() {
            None => ArgSource::Auto,
            Some(raw) => {
                ArgSource::parse(raw).ok_or_else(|| DescriptorError::InvalidSource(raw.to_string()))?
            }
        };

        let mut spec = ArgSpec::new(self.arg, arg_type, source).with_required(self.required);
        if let Some(wire_name) = http.name {
            spec = spec.with_wire_name(wire_name);
        }
        if let Some(description) = self.description {
            spec = spec.with_description(description);
        }
        Ok(spec)
    }
}

impl ReturnDeclaration {
    fn into_spec(self) -> Result<ReturnSpec, DescriptorError> {
        let type_decl = match &self.return_type {
            None => TypeDecl::Named(ArgType::Any),
            Some(value) => TypeDecl::from_json(value)?,
        };

        let mut spec = ReturnSpec::new(self.arg, type_decl).with_root(self.root);
        if let Some(description) = self.description {
            spec = spec.with_description(description);
        }
        Ok(spec)
    }
}

/// `Ok(None)` means the method accepts every verb.
fn parse_verb(raw: &str) -> Result<Option<Method>, DescriptorError> {
    let upper = raw.trim().to_ascii_uppercase();
    if upper == "ALL" {
        return Ok(None);
    }
    if upper == "DEL" {
        return Ok(Some(Method::DELETE));
    }
    Method::from_bytes(upper.as_bytes())
        .map(Some)
        .map_err(|_| DescriptorError::InvalidVerb(raw.to_string()))
}
