use super::{ArgSource, ArgSpec, DescriptorError, PathTemplate, ReturnSpec};
use crate::constants::DEFAULT_HTTP_VERB;
use http::Method;
use std::collections::HashSet;

/// HTTP binding of a method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRoute {
    /// `None` accepts every verb.
    pub verb: Option<Method>,
    pub path: PathTemplate,
}

impl HttpRoute {
    pub fn accepts_verb(&self, verb: &Method) -> bool {
        self.verb.as_ref().is_none_or(|v| v == verb)
    }
}

/// Immutable description of a remotely invokable method.
///
/// `accepts` and `returns` order is the only source of positional order:
/// argument `i` of the target method is resolved from `accepts[i]`, and
/// output value `i` is paired with `returns[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodDescriptor {
    name: String,
    accepts: Vec<ArgSpec>,
    returns: Vec<ReturnSpec>,
    http: HttpRoute,
}

impl MethodDescriptor {
    pub fn builder(name: impl Into<String>) -> MethodDescriptorBuilder {
        MethodDescriptorBuilder {
            name: name.into(),
            accepts: Vec::new(),
            returns: Vec::new(),
            verb: None,
            path: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn accepts(&self) -> &[ArgSpec] {
        &self.accepts
    }

    pub fn returns(&self) -> &[ReturnSpec] {
        &self.returns
    }

    pub fn http(&self) -> &HttpRoute {
        &self.http
    }

    /// The single root return spec and its position, if one is declared.
    pub fn root_return(&self) -> Option<(usize, &ReturnSpec)> {
        self.returns.iter().enumerate().find(|(_, spec)| spec.root)
    }

    /// Number of arguments read from the request body.
    pub fn body_arg_count(&self) -> usize {
        self.accepts
            .iter()
            .filter(|spec| spec.source == ArgSource::Body)
            .count()
    }
}

pub struct MethodDescriptorBuilder {
    name: String,
    accepts: Vec<ArgSpec>,
    returns: Vec<ReturnSpec>,
    verb: Option<Option<Method>>,
    path: Option<String>,
}

impl MethodDescriptorBuilder {
    pub fn accepts(mut self, spec: ArgSpec) -> Self {
        self.accepts.push(spec);
        self
    }

    pub fn returns(mut self, spec: ReturnSpec) -> Self {
        self.returns.push(spec);
        self
    }

    pub fn verb(mut self, verb: Method) -> Self {
        self.verb = Some(Some(verb));
        self
    }

    /// Accepts every HTTP verb.
    pub fn any_verb(mut self) -> Self {
        self.verb = Some(None);
        self
    }

    pub fn path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn build(self) -> Result<MethodDescriptor, DescriptorError> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err(DescriptorError::EmptyName);
        }

        let verb = match self.verb {
            Some(verb) => verb,
            None => Some(
                Method::from_bytes(DEFAULT_HTTP_VERB.as_bytes())
                    .map_err(|_| DescriptorError::InvalidVerb(DEFAULT_HTTP_VERB.to_string()))?,
            ),
        };
        let raw_path = self.path.unwrap_or_else(|| format!("/{name}"));
        let path = PathTemplate::parse(&raw_path)?;

        let mut seen = HashSet::new();
        for spec in &self.accepts {
            if !seen.insert(spec.name.as_str()) {
                return Err(DescriptorError::DuplicateArgument {
                    method: name,
                    argument: spec.name.clone(),
                });
            }
            if spec.source == ArgSource::Path && !path.has_param(spec.lookup_key()) {
                return Err(DescriptorError::UnboundPathArgument {
                    method: name,
                    argument: spec.name.clone(),
                    path: raw_path,
                });
            }
        }

        let mut seen = HashSet::new();
        for spec in &self.returns {
            if !seen.insert(spec.name.as_str()) {
                return Err(DescriptorError::DuplicateReturn {
                    method: name,
                    name: spec.name.clone(),
                });
            }
        }

        match self.returns.iter().filter(|spec| spec.root).count() {
            0 => {}
            1 if self.returns.len() == 1 => {}
            1 => return Err(DescriptorError::RootWithNamedReturns { method: name }),
            _ => return Err(DescriptorError::MultipleRoots { method: name }),
        }

        Ok(MethodDescriptor {
            name,
            accepts: self.accepts,
            returns: self.returns,
            http: HttpRoute { verb, path },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ArgType;

    #[test]
    fn defaults_to_post_on_method_name() {
        let descriptor = MethodDescriptor::builder("ping").build().unwrap();
        assert_eq!(descriptor.http().verb, Some(Method::POST));
        assert_eq!(descriptor.http().path.as_str(), "/ping");
    }

    #[test]
    fn rejects_path_arguments_missing_from_template() {
        let err = MethodDescriptor::builder("get")
            .accepts(ArgSpec::new("id", ArgType::String, ArgSource::Path))
            .path("/items")
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::UnboundPathArgument { .. }));
    }

    #[test]
    fn rejects_mixed_root_and_named_returns() {
        let err = MethodDescriptor::builder("mixed")
            .returns(ReturnSpec::new("a", ArgType::Number).root())
            .returns(ReturnSpec::new("b", ArgType::Number))
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::RootWithNamedReturns { .. }));
    }

    #[test]
    fn rejects_duplicate_arguments() {
        let err = MethodDescriptor::builder("dup")
            .accepts(ArgSpec::new("a", ArgType::Number, ArgSource::Query))
            .accepts(ArgSpec::new("a", ArgType::Number, ArgSource::Header))
            .build()
            .unwrap_err();
        assert!(matches!(err, DescriptorError::DuplicateArgument { .. }));
    }
}
