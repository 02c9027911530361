//! Error types for property composition
//!
//! Schema errors surface when a host's schema is built, value errors when a
//! property is assigned, capability errors when a host is rendered.

use thiserror::Error;

/// Result type alias for property operations
pub type Result<T> = std::result::Result<T, PropertiesError>;

/// Errors raised while declaring, assigning or rendering properties
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PropertiesError {
    /// A value property was constructed from an absent value
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Two descriptors on one host type share a name
    #[error("name collision: `{0}` is already declared")]
    NameCollision(String),

    /// The host element did not supply a tag or namespace
    #[error("missing capability: host element has no {0}")]
    MissingCapability(&'static str),

    /// An attribute was declared with an unrecognized coercion
    #[error("unknown coercion: `{0}`")]
    UnknownCoercion(String),

    /// The XML writer failed
    #[error("write error: {0}")]
    Write(String),
}

impl PropertiesError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a name collision error
    pub fn name_collision(name: impl Into<String>) -> Self {
        Self::NameCollision(name.into())
    }
}
