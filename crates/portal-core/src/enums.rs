//! Renderer kinds, value types, facet types, and sort orders for Portal.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Display strategy selected for a logical field.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum Renderer {
    #[default]
    Plain,
    Title,
    Description,
    Link,
    Time,
    Bullets,
    Entity,
    Reference,
    None,
}

impl Renderer {
    /// Every renderer kind, in declaration order.
    pub const ALL: [Self; 9] = [
        Self::Plain,
        Self::Title,
        Self::Description,
        Self::Link,
        Self::Time,
        Self::Bullets,
        Self::Entity,
        Self::Reference,
        Self::None,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Plain => "plain",
            Self::Title => "title",
            Self::Description => "description",
            Self::Link => "link",
            Self::Time => "time",
            Self::Bullets => "bullets",
            Self::Entity => "entity",
            Self::Reference => "reference",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Renderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ValueType
// ---------------------------------------------------------------------------

/// Storage type of a single underlying field value.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    #[default]
    Text,
    Date,
    DateTime,
    Year,
    Number,
    Url,
}

impl ValueType {
    /// Whether values of this type are formatted as dates or timestamps.
    #[must_use]
    pub const fn is_temporal(self) -> bool {
        matches!(self, Self::Date | Self::DateTime)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Date => "date",
            Self::DateTime => "date_time",
            Self::Year => "year",
            Self::Number => "number",
            Self::Url => "url",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// FacetType
// ---------------------------------------------------------------------------

/// Kind of filterable dimension.
///
/// `Exact` axes hold any number of selected values, `YearRange` axes hold
/// exactly one `"<min>-<max>"` value, and `Hierarchy` axes hold tree paths.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum FacetType {
    #[default]
    Exact,
    YearRange,
    Hierarchy,
}

impl FacetType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::YearRange => "year_range",
            Self::Hierarchy => "hierarchy",
        }
    }
}

impl fmt::Display for FacetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// SortOrder
// ---------------------------------------------------------------------------

/// Sort direction.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    /// Parse the URL representation. Unknown values yield `None`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
