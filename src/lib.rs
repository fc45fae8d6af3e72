//! Request/response marshalling for remotely invokable methods.
//!
//! A method is described once by a [`descriptor::MethodDescriptor`] (ordered
//! argument specs, ordered return specs, an HTTP route) and registered with a
//! handler in a [`registry::MethodRegistry`]. For every incoming request the
//! [`engine::RemotingEngine`] resolves and coerces the arguments, invokes the
//! handler through a single-assignment completion channel, and serializes the
//! outcome (or a structured error envelope) into an
//! [`response::OutgoingResponse`].
//!
//! The crate is transport-agnostic: the HTTP listener, routing integration and
//! body parsing live in adapter crates that implement
//! [`request::IncomingRequest`].

pub mod config;
pub mod constants;
pub mod descriptor;
pub mod engine;
pub mod marshal;
pub mod registry;
pub mod request;
pub mod response;
pub mod value;

pub use http;

pub use config::RemotingConfig;
pub use engine::RemotingEngine;
pub use registry::{MethodRegistry, RemoteMethod, method_id_hash};
