mod argument_resolver;
mod coerce;
mod completion;
mod error_envelope;
mod invoker;
mod marshal_error;
mod result_serializer;

pub use argument_resolver::*;
pub use completion::*;
pub use error_envelope::*;
pub use invoker::*;
pub use marshal_error::*;
pub use result_serializer::*;
