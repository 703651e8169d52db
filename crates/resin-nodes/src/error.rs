//! Error types for resin-nodes.

use thiserror::Error;

use crate::value::SocketType;

/// Misuse of a node's sockets by its execute function.
///
/// These are bugs in the node implementation, not bad user input. The
/// trapping accessors of [`GeoNodeExecParams`](crate::GeoNodeExecParams)
/// panic on them in debug builds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    /// No input has this identifier.
    #[error("did not find an input socket with the identifier '{identifier}'; possible identifiers are: {available}")]
    UnknownInput {
        /// Requested identifier.
        identifier: String,
        /// Enabled identifiers, quoted and comma separated.
        available: String,
    },

    /// The input exists but is disabled.
    #[error("the input socket '{0}' is disabled")]
    DisabledInput(String),

    /// The input value was already extracted.
    #[error("the input '{0}' is valid, but there is no value for it anymore; most likely it has been extracted before")]
    InputConsumed(String),

    /// The input was requested with the wrong type.
    #[error("the requested type '{requested}' of input '{identifier}' is incorrect, expected '{expected}'")]
    InputTypeMismatch {
        /// Input identifier.
        identifier: String,
        /// Type asked for.
        requested: SocketType,
        /// Declared type.
        expected: SocketType,
    },

    /// No output has this identifier.
    #[error("did not find an output socket with the identifier '{identifier}'; possible identifiers are: {available}")]
    UnknownOutput {
        /// Requested identifier.
        identifier: String,
        /// Enabled identifiers, quoted and comma separated.
        available: String,
    },

    /// The output exists but is disabled.
    #[error("the output socket '{0}' is disabled")]
    DisabledOutput(String),

    /// The output was already set.
    #[error("the output '{0}' has been set already")]
    OutputAlreadySet(String),

    /// The output was set with the wrong type.
    #[error("the value type '{provided}' of output '{identifier}' is incorrect, expected '{expected}'")]
    OutputTypeMismatch {
        /// Output identifier.
        identifier: String,
        /// Type provided.
        provided: SocketType,
        /// Declared type.
        expected: SocketType,
    },

    /// The input's kind cannot be used by the requested operation.
    #[error("input '{identifier}' of type '{socket_type}' cannot be used by {operation}")]
    UnsupportedSocketType {
        /// Input identifier.
        identifier: String,
        /// Declared type.
        socket_type: SocketType,
        /// The operation that rejected it.
        operation: &'static str,
    },
}

/// Formats identifiers as `'a', 'b'`.
pub(crate) fn quote_identifiers<'a>(identifiers: impl Iterator<Item = &'a str>) -> String {
    identifiers
        .map(|id| format!("'{id}'"))
        .collect::<Vec<_>>()
        .join(", ")
}
