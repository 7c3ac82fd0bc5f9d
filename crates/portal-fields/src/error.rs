//! Field pipeline error types.

use portal_core::CoreError;

/// Errors from building or querying the field registry.
#[derive(Debug, thiserror::Error)]
pub enum FieldError {
    /// A field definition violates a structural invariant.
    #[error("invalid field: {0}")]
    Invalid(#[from] CoreError),

    /// Two definitions share the same name.
    #[error("duplicate field: {0}")]
    DuplicateField(String),

    /// A reference field points at a field that is not registered.
    #[error("field '{field}' links to unknown field '{linked}'")]
    UnknownLinkedField { field: String, linked: String },

    /// Lookup of a field name that is not registered.
    #[error("unknown field: {0}")]
    UnknownField(String),
}
