use crate::config::RemotingConfig;
use crate::marshal::{ArgumentResolver, ErrorEnvelope, Invoker, MarshalError, ResultSerializer};
use crate::registry::{MethodRegistry, RemoteMethod};
use crate::request::IncomingRequest;
use crate::response::OutgoingResponse;
use http::Method;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Runs the marshalling pipeline for incoming requests:
/// resolve arguments → invoke → serialize, or build an error envelope.
///
/// Each request owns its argument list and completion channel; the only
/// shared state is the frozen registry, so any number of requests may be in
/// flight at once without locking.
#[derive(Debug, Clone)]
pub struct RemotingEngine {
    registry: Arc<MethodRegistry>,
    config: RemotingConfig,
}

impl RemotingEngine {
    pub fn new(registry: MethodRegistry, config: RemotingConfig) -> Self {
        Self {
            registry: Arc::new(registry),
            config,
        }
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn config(&self) -> &RemotingConfig {
        &self.config
    }

    /// Handles a request addressed to a method by name.
    pub async fn handle(&self, name: &str, request: &dyn IncomingRequest) -> OutgoingResponse {
        match self.registry.get(name) {
            Some(method) => self.handle_method(method, request).await,
            None => self.error_response(&MarshalError::MethodNotFound(name.to_string())),
        }
    }

    /// Handles a request addressed to a method by [`crate::method_id_hash`].
    pub async fn handle_id(&self, id: u64, request: &dyn IncomingRequest) -> OutgoingResponse {
        match self.registry.get_by_id(id) {
            Some(method) => self.handle_method(method, request).await,
            None => self.error_response(&MarshalError::MethodNotFound(format!("{id:#x}"))),
        }
    }

    /// Routes by verb and path, merging the captured path parameters into
    /// the request. `None` when no method is bound to the route.
    pub async fn dispatch(
        &self,
        verb: &Method,
        path: &str,
        request: &dyn IncomingRequest,
    ) -> Option<OutgoingResponse> {
        let (method, params) = self.registry.route(verb, path)?;
        let request = WithPathParams::new(request, params);
        Some(self.handle_method(method, &request).await)
    }

    pub async fn handle_method(
        &self,
        method: &RemoteMethod,
        request: &dyn IncomingRequest,
    ) -> OutgoingResponse {
        match self.execute(method, request).await {
            Ok(body) => OutgoingResponse::success(body),
            Err(err) => self.error_response(&err),
        }
    }

    /// The pipeline proper. Each stage completes before the next begins and
    /// the handler is never called for a request that failed resolution.
    pub async fn execute(
        &self,
        method: &RemoteMethod,
        request: &dyn IncomingRequest,
    ) -> Result<Option<Value>, MarshalError> {
        let descriptor = &method.descriptor;
        let name = descriptor.name();

        let args = ArgumentResolver::new(descriptor).resolve(request)?;
        tracing::debug!(method = name, args = args.len(), "arguments resolved");

        let outputs = Invoker::invoke(name, &method.handler, args).await?;
        tracing::debug!(method = name, outputs = outputs.len(), "method completed");

        Ok(ResultSerializer::serialize(descriptor, &outputs))
    }

    /// Converts a failure into its envelope response.
    pub fn error_response(&self, err: &MarshalError) -> OutgoingResponse {
        match err {
            MarshalError::Validation(_)
            | MarshalError::MethodNotFound(_)
            | MarshalError::MalformedBody(_) => {
                tracing::warn!(error = %err, "request rejected");
            }
            MarshalError::Invocation(_) | MarshalError::Serialization(_) => {
                tracing::error!(error = %err, "request failed");
            }
        }
        ErrorEnvelope::build(err, self.config.debug).into_response()
    }
}

/// Overlays path parameters captured by routing onto another request.
struct WithPathParams<'a> {
    inner: &'a dyn IncomingRequest,
    params: HashMap<String, Value>,
}

impl<'a> WithPathParams<'a> {
    fn new(inner: &'a dyn IncomingRequest, params: HashMap<String, String>) -> Self {
        Self {
            inner,
            params: params
                .into_iter()
                .map(|(k, v)| (k, Value::String(v)))
                .collect(),
        }
    }
}

impl IncomingRequest for WithPathParams<'_> {
    fn path_param(&self, name: &str) -> Option<&Value> {
        self.params
            .get(name)
            .or_else(|| self.inner.path_param(name))
    }

    fn query(&self, name: &str) -> Option<&Value> {
        self.inner.query(name)
    }

    fn header(&self, name: &str) -> Option<&Value> {
        self.inner.header(name)
    }

    fn body(&self) -> Option<&Value> {
        self.inner.body()
    }

    fn form(&self, name: &str) -> Option<&Value> {
        self.inner.form(name)
    }

    fn form_data(&self, name: &str) -> Option<&Value> {
        self.inner.form_data(name)
    }
}
