use super::{ValidationError, ValidationReason, coerce::coerce};
use crate::descriptor::{ArgSource, ArgSpec, ArgType, MethodDescriptor};
use crate::request::IncomingRequest;
use crate::value::{Arguments, RemoteValue};
use serde_json::Value;

/// Produces the positional argument list for a method from a request.
///
/// Arguments are resolved in declaration order and resolution stops at the
/// first invalid argument; only that one is reported.
pub struct ArgumentResolver<'d> {
    descriptor: &'d MethodDescriptor,
    whole_body_arg: Option<usize>,
}

impl<'d> ArgumentResolver<'d> {
    pub fn new(descriptor: &'d MethodDescriptor) -> Self {
        // A lone body argument without a field mapping receives the entire body.
        let whole_body_arg = match descriptor.body_arg_count() {
            1 => descriptor
                .accepts()
                .iter()
                .position(|spec| spec.source == ArgSource::Body && spec.wire_name.is_none()),
            _ => None,
        };

        Self {
            descriptor,
            whole_body_arg,
        }
    }

    pub fn resolve(&self, request: &dyn IncomingRequest) -> Result<Arguments, ValidationError> {
        let accepts = self.descriptor.accepts();
        let mut args = Arguments::with_capacity(accepts.len());

        for (index, spec) in accepts.iter().enumerate() {
            let value = self.resolve_one(index, spec, request)?;
            args.push(spec.name.clone(), value);
        }

        Ok(args)
    }

    fn resolve_one(
        &self,
        index: usize,
        spec: &ArgSpec,
        request: &dyn IncomingRequest,
    ) -> Result<Option<RemoteValue>, ValidationError> {
        let raw = self.extract(index, spec, request);
        let value = coerce(&spec.arg_type, raw)
            .map_err(|reason| ValidationError::new(&spec.name, reason))?;

        if spec.required {
            match &value {
                None => {
                    return Err(ValidationError::new(&spec.name, ValidationReason::Missing));
                }
                Some(RemoteValue::String(s)) if s.is_empty() && spec.arg_type == ArgType::String => {
                    return Err(ValidationError::new(
                        &spec.name,
                        ValidationReason::EmptyString,
                    ));
                }
                Some(_) => {}
            }
        }

        Ok(value)
    }

    fn extract<'r>(
        &self,
        index: usize,
        spec: &ArgSpec,
        request: &'r dyn IncomingRequest,
    ) -> Option<&'r Value> {
        let key = spec.lookup_key();
        match spec.source {
            ArgSource::Path => request.path_param(key),
            ArgSource::Query => request.query(key),
            ArgSource::Header => request.header(key),
            ArgSource::Form => request.form(key),
            ArgSource::FormData => request.form_data(key),
            ArgSource::Body if self.whole_body_arg == Some(index) => request.body(),
            ArgSource::Body => body_field(request, key),
            ArgSource::Auto => request
                .path_param(key)
                .or_else(|| request.query(key))
                .or_else(|| body_field(request, key))
                .or_else(|| request.form(key)),
        }
    }
}

fn body_field<'r>(request: &'r dyn IncomingRequest, key: &str) -> Option<&'r Value> {
    request.body().and_then(|body| body.get(key))
}
