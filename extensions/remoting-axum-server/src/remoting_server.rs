//! Note: `RemotingServer` does not include authentication or authorization.
//! Any type that can build an [`IncomingRequest`](remoting::request::IncomingRequest)
//! can drive a [`RemotingEngine`]; this implementation does so over plain
//! HTTP using the Axum web framework.

use crate::{ServerConfig, ServerError, extract_request};
use axum::{
    Router,
    body::Body,
    extract::{DefaultBodyLimit, Request},
    http::{HeaderValue, StatusCode, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use remoting::RemotingEngine;
use remoting::marshal::MarshalError;
use remoting::response::OutgoingResponse;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::{TcpListener, ToSocketAddrs};

/// An HTTP server exposing every method registered with its engine.
pub struct RemotingServer {
    engine: Arc<RemotingEngine>,
    config: ServerConfig,
}

impl RemotingServer {
    pub fn new(engine: RemotingEngine) -> Self {
        Self::with_config(engine, ServerConfig::default())
    }

    pub fn with_config(engine: RemotingEngine, config: ServerConfig) -> Self {
        Self {
            engine: Arc::new(engine),
            config,
        }
    }

    /// Returns an `Arc` clone of the underlying engine.
    pub fn engine(&self) -> Arc<RemotingEngine> {
        self.engine.clone()
    }

    /// Builds the Axum router. All paths fall through to method routing.
    ///
    /// `max_body_bytes` also bounds extractors that read the body as a
    /// stream, such as multipart.
    pub fn router(self: Arc<Self>) -> Router {
        let body_limit = DefaultBodyLimit::max(self.config.max_body_bytes);
        Router::new()
            .fallback(move |request: Request| {
                let server = self.clone();
                async move { server.handle_request(request).await }
            })
            .layer(body_limit)
    }

    /// Binds to an address and serves until the listener fails.
    pub async fn serve<A: ToSocketAddrs + std::fmt::Display>(
        self,
        addr: A,
    ) -> Result<SocketAddr, ServerError> {
        let display = addr.to_string();
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: display,
                source,
            })?;
        Arc::new(self).serve_with_listener(listener).await
    }

    /// Convenience wrapper around [`RemotingServer::serve`].
    pub async fn serve_on(self, host: &str, port: u16) -> Result<SocketAddr, ServerError> {
        self.serve(format!("{host}:{port}")).await
    }

    /// Serves on a pre-bound listener, e.g. one bound to port 0.
    pub async fn serve_with_listener(
        self: Arc<Self>,
        listener: TcpListener,
    ) -> Result<SocketAddr, ServerError> {
        let address = listener.local_addr()?;
        tracing::info!(
            %address,
            methods = self.engine.registry().len(),
            "remoting server running"
        );
        let app = self.router();
        axum::serve(listener, app).await?;
        Ok(address)
    }

    async fn handle_request(&self, request: Request) -> Response {
        let verb = request.method().clone();
        let path = request.uri().path().to_string();
        tracing::debug!(%verb, %path, "incoming request");

        let Some((method, path_params)) = self.engine.registry().route(&verb, &path) else {
            let err = MarshalError::MethodNotFound(format!("{verb} {path}"));
            return self.to_http_response(self.engine.error_response(&err));
        };

        let response = match extract_request(request, path_params, self.config.max_body_bytes).await {
            Ok(parts) => self.engine.handle_method(method, &parts).await,
            Err(err) => self.engine.error_response(&err),
        };
        self.to_http_response(response)
    }

    fn to_http_response(&self, response: OutgoingResponse) -> Response {
        let bytes = match response.body_bytes() {
            Ok(bytes) => bytes,
            Err(err) => {
                let fallback = self
                    .engine
                    .error_response(&MarshalError::Serialization(err.to_string()));
                return match fallback.body_bytes() {
                    Ok(bytes) => json_response(fallback.status, bytes),
                    Err(_) => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
                };
            }
        };

        match response.content_type() {
            Some(_) => json_response(response.status, bytes),
            None => response.status.into_response(),
        }
    }
}

fn json_response(status: StatusCode, bytes: Vec<u8>) -> Response {
    let mut response = Response::new(Body::from(bytes));
    *response.status_mut() = status;
    response.headers_mut().insert(
        CONTENT_TYPE,
        HeaderValue::from_static(remoting::constants::APPLICATION_JSON),
    );
    response
}
