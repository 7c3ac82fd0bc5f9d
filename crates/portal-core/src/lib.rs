//! # portal-core
//!
//! Core data model and error types for Portal.
//!
//! This crate provides the foundational types shared across all Portal crates:
//! - Logical display fields and their underlying storage sources
//! - Retrieved items (entity records with ordered field values)
//! - Facet configuration, facet buckets, and hierarchy trees
//! - Wire types exchanged with the search backend
//! - Renderer, value-type, facet-type, and sort-order enums
//! - Cross-cutting error types

pub mod enums;
pub mod errors;
pub mod facet;
pub mod field;
pub mod item;
pub mod search;

pub use enums::{FacetType, Renderer, SortOrder, ValueType};
pub use errors::CoreError;
pub use facet::{
    Bucket, Hierarchy, HierarchyInfo, HierarchyNode, SearchFacet, SearchResultsFacet,
};
pub use field::{Field, FieldSource};
pub use item::{Item, ItemValue};
pub use search::{
    FacetRequest, FilterParam, HierarchyRequest, SearchParams, SearchResponse, SortSpec, Sorting,
};
