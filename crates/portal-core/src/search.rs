//! Wire types exchanged with the search backend.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{FacetType, SortOrder};
use crate::facet::SearchResultsFacet;
use crate::item::Item;

/// A user-selected sort option. `axis == None` selects relevance ordering.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
pub struct Sorting {
    pub axis: Option<String>,
    pub order: SortOrder,
}

impl Sorting {
    #[must_use]
    pub const fn relevance() -> Self {
        Self {
            axis: None,
            order: SortOrder::Desc,
        }
    }

    #[must_use]
    pub fn by(axis: impl Into<String>, order: SortOrder) -> Self {
        Self {
            axis: Some(axis.into()),
            order,
        }
    }

    #[must_use]
    pub const fn is_relevance(&self) -> bool {
        self.axis.is_none()
    }
}

/// Sort specification sent to the backend. Absent means relevance.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SortSpec {
    pub axis: String,
    pub order: SortOrder,
}

/// Selected values of one axis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FilterParam {
    pub axis: String,
    #[serde(rename = "type")]
    pub facet_type: FacetType,
    pub values: Vec<String>,
}

/// One requested page of buckets for an axis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct FacetRequest {
    pub axis: String,
    pub offset: u64,
    pub limit: u64,
}

/// Parameters of a search request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchParams {
    pub query: String,
    pub offset: u64,
    pub limit: u64,
    #[serde(default)]
    pub filters: Vec<FilterParam>,
    #[serde(default)]
    pub facets: Vec<FacetRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<SortSpec>,
}

/// Response of a search request.
///
/// `facets` may hold fewer facets than were requested; missing ones are
/// treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchResponse {
    pub num_found: u64,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub facets: Vec<SearchResultsFacet>,
}

/// Request for one level of a hierarchy.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HierarchyRequest {
    pub axis: String,
    /// Value of the node whose children are requested; `None` for roots.
    #[serde(default)]
    pub parent: Option<String>,
}
