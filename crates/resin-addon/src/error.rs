//! Error types for resin-addon.

use thiserror::Error;

/// Errors from add-on bookkeeping.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddonError {
    /// Module names cannot be empty.
    #[error("add-on module name is empty")]
    EmptyModule,

    /// Preference type identifiers cannot be empty.
    #[error("add-on preference type has an empty idname")]
    EmptyIdname,

    /// A preference type with this identifier is already registered.
    #[error("add-on preference type '{0}' is already registered")]
    DuplicatePrefType(String),
}
