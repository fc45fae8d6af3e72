//! Serves a [`remoting::RemotingEngine`] over HTTP with Axum.
//!
//! Every request falls through to a single handler that routes it against
//! the registered methods' verb and path templates, turns the HTTP request
//! into a [`remoting::request::RequestParts`] and writes the engine's
//! response back out.

mod error;
pub use error::ServerError;

mod remoting_server;
pub use remoting_server::*;

mod request_extract;
pub use request_extract::extract_request;

mod server_config;
pub use server_config::*;
