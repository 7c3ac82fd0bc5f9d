//! # portal-client
//!
//! HTTP client for the Portal search and item API.
//!
//! Endpoints, relative to `backend.base_url`:
//! - `POST /search` with a JSON [`SearchParams`] body, answering a [`SearchResponse`]
//! - `GET /hierarchy/{axis}?parent={value}`, answering a [`Hierarchy`]
//! - `GET /items/{id}`, answering an [`Item`] (404 when it does not exist)
//!
//! [`BackendClient`] implements both [`SearchBackend`] and [`ItemBackend`], so
//! a search session and reference resolution can share one connection pool.

mod error;
mod http;

pub use error::ClientError;

use std::time::Duration;

use portal_config::BackendConfig;
use portal_core::{Hierarchy, HierarchyRequest, Item, SearchParams, SearchResponse};
use portal_fields::ItemBackend;
use portal_search::SearchBackend;

use crate::http::read_json;

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    /// Build a client from backend settings.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::NotConfigured`] without a base URL, or
    /// [`ClientError::Http`] if the underlying client cannot be built.
    pub fn new(config: &BackendConfig) -> Result<Self, ClientError> {
        if !config.is_configured() {
            return Err(ClientError::NotConfigured);
        }
        let http = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url().to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn search_url(&self) -> String {
        format!("{}/search", self.base_url)
    }

    fn hierarchy_url(&self, request: &HierarchyRequest) -> String {
        let mut url = format!(
            "{}/hierarchy/{}",
            self.base_url,
            urlencoding::encode(&request.axis)
        );
        if let Some(parent) = &request.parent {
            url.push_str("?parent=");
            url.push_str(&urlencoding::encode(parent));
        }
        url
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/items/{}", self.base_url, urlencoding::encode(id))
    }

    /// Run a search.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the API answers with a
    /// non-success status, or the body is not a search response.
    pub async fn search(&self, params: &SearchParams) -> Result<SearchResponse, ClientError> {
        let url = self.search_url();
        tracing::debug!(%url, query = %params.query, offset = params.offset, "search request");
        let resp = self.http.post(&url).json(params).send().await?;
        read_json(resp, "search response").await
    }

    /// Fetch one level of a hierarchy.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the API answers with a
    /// non-success status, or the body is not a hierarchy.
    pub async fn hierarchy(&self, request: &HierarchyRequest) -> Result<Hierarchy, ClientError> {
        let url = self.hierarchy_url(request);
        tracing::debug!(%url, "hierarchy request");
        let resp = self.http.get(&url).send().await?;
        read_json(resp, "hierarchy").await
    }

    /// Fetch an item by business id. `Ok(None)` on 404.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the API answers with a
    /// status other than success or 404, or the body is not an item.
    pub async fn item(&self, id: &str) -> Result<Option<Item>, ClientError> {
        let url = self.item_url(id);
        tracing::debug!(%url, "item request");
        let resp = self.http.get(&url).send().await?;
        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        read_json(resp, "item").await.map(Some)
    }
}

impl SearchBackend for BackendClient {
    type Error = ClientError;

    async fn fetch_results(&self, params: &SearchParams) -> Result<SearchResponse, ClientError> {
        self.search(params).await
    }

    async fn fetch_hierarchy(&self, request: &HierarchyRequest) -> Result<Hierarchy, ClientError> {
        self.hierarchy(request).await
    }
}

impl ItemBackend for BackendClient {
    type Error = ClientError;

    async fn resolve_link(&self, id: &str) -> Result<Option<Item>, ClientError> {
        self.item(id).await
    }
}
