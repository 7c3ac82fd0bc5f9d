//! Search error types for portal-search.

/// Boxed error of a backend implementation.
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Errors from search orchestration.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// The search backend failed. Retrying is up to the caller.
    #[error("backend error: {0}")]
    Backend(#[source] BackendError),

    /// The axis is not part of the configured facet set.
    #[error("unknown axis: {0}")]
    UnknownAxis(String),
}

impl SearchError {
    pub(crate) fn backend(error: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Backend(Box::new(error))
    }
}
