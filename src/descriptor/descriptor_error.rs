/// A method descriptor could not be built from its declaration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("method name must not be empty")]
    EmptyName,

    #[error("method {method:?} declares argument {argument:?} more than once")]
    DuplicateArgument { method: String, argument: String },

    #[error("method {method:?} declares return value {name:?} more than once")]
    DuplicateReturn { method: String, name: String },

    #[error("method {method:?} declares more than one root return value")]
    MultipleRoots { method: String },

    #[error("method {method:?} mixes a root return value with named return values")]
    RootWithNamedReturns { method: String },

    #[error("method {method:?} reads path argument {argument:?} but its path {path:?} has no such segment")]
    UnboundPathArgument {
        method: String,
        argument: String,
        path: String,
    },

    #[error("invalid path template {0:?}")]
    InvalidPath(String),

    #[error("invalid HTTP verb {0:?}")]
    InvalidVerb(String),

    #[error("invalid argument source {0:?}")]
    InvalidSource(String),

    #[error("invalid type declaration {0}")]
    InvalidType(String),

    #[error("malformed declaration: {0}")]
    Malformed(String),
}
