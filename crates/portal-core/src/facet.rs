//! Facet configuration, facet response buckets, and hierarchy trees.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::FacetType;

/// One configured filterable dimension.
///
/// `name` is the axis identifier (unique within the active facet set) and
/// doubles as the URL parameter key for the axis' filter values.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchFacet {
    pub name: String,
    /// Field whose label is shown for the axis.
    pub ui_field: String,
    #[serde(default, rename = "type")]
    pub facet_type: FacetType,
}

impl SearchFacet {
    #[must_use]
    pub fn new(name: impl Into<String>, ui_field: impl Into<String>, facet_type: FacetType) -> Self {
        Self {
            name: name.into(),
            ui_field: ui_field.into(),
            facet_type,
        }
    }
}

/// Position of a bucket inside a tree-shaped facet.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HierarchyInfo {
    #[serde(default)]
    pub label: Option<String>,
    /// Ancestor values, root first.
    #[serde(default)]
    pub parents: Vec<String>,
    #[serde(default)]
    pub has_children: bool,
}

/// One discrete facet value plus its result count.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Bucket {
    pub value: String,
    pub count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hierarchy_info: Option<HierarchyInfo>,
}

impl Bucket {
    #[must_use]
    pub fn new(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            count,
            hierarchy_info: None,
        }
    }
}

/// Facet data returned by the search backend.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SearchResultsFacet {
    pub axis: String,
    #[serde(default)]
    pub buckets: Vec<Bucket>,
    /// Total number of distinct buckets available for the axis.
    pub bucket_no: u64,
}

/// A node of a hierarchy used for drill-down browsing.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct HierarchyNode {
    pub value: String,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub children: Vec<HierarchyNode>,
}

impl HierarchyNode {
    #[must_use]
    pub fn leaf(value: impl Into<String>, count: u64) -> Self {
        Self {
            value: value.into(),
            label: None,
            count: Some(count),
            children: Vec::new(),
        }
    }
}

/// A tree-shaped facet returned for one axis.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Hierarchy {
    pub axis: String,
    #[serde(default)]
    pub nodes: Vec<HierarchyNode>,
}
