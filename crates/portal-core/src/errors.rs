//! Cross-cutting error types for Portal.
//!
//! Domain-specific errors (e.g., `FieldError`, `SearchError`) are defined in
//! their respective crates. A unified error is deferred to `portal-cli` where
//! all crate errors converge.

use thiserror::Error;

/// Errors that can be raised by any Portal crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
