//! Error types for resin-core.

use crate::domain::AttributeDomain;
use crate::value::AttributeType;
use thiserror::Error;

/// Error when a value has the wrong type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("type error: expected {expected}, got {got}")]
pub struct TypeError {
    /// The type that was expected.
    pub expected: AttributeType,
    /// The type that was actually provided.
    pub got: AttributeType,
}

impl TypeError {
    /// Create a new type error.
    pub fn expected(expected: AttributeType, got: AttributeType) -> Self {
        Self { expected, got }
    }
}

/// Errors that can occur when writing attributes to a component.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttributeError {
    /// The column length does not match the element count of its domain.
    #[error("attribute \"{name}\" has {len} values but the {domain} domain has {expected} elements")]
    LengthMismatch {
        /// Attribute name.
        name: String,
        /// Target domain.
        domain: AttributeDomain,
        /// Length of the provided column.
        len: usize,
        /// Element count of the domain.
        expected: usize,
    },

    /// The component has no elements of this kind.
    #[error("the {0} domain is not supported by this component")]
    UnsupportedDomain(AttributeDomain),

    /// Attribute names must be non-empty.
    #[error("attribute name must not be empty")]
    EmptyName,

    /// The name belongs to a built-in attribute with a fixed type and domain.
    #[error("\"{0}\" is a built-in attribute")]
    BuiltinName(String),
}
