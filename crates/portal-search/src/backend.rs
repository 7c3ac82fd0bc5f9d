//! Collaborator interface to the search service.

use std::future::Future;

use portal_core::{Hierarchy, HierarchyRequest, SearchParams, SearchResponse};

/// Executes searches and hierarchy lookups.
///
/// Implementations own transport concerns (timeouts, authentication). The
/// session calls each method at most once per operation and never retries.
pub trait SearchBackend {
    type Error: std::error::Error + Send + Sync + 'static;

    fn fetch_results(
        &self,
        params: &SearchParams,
    ) -> impl Future<Output = Result<SearchResponse, Self::Error>> + Send;

    fn fetch_hierarchy(
        &self,
        request: &HierarchyRequest,
    ) -> impl Future<Output = Result<Hierarchy, Self::Error>> + Send;
}
