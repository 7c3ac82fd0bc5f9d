//! Search paging and default sort settings.

use portal_core::{SortOrder, Sorting};
use serde::{Deserialize, Serialize};

/// Default number of results per page.
const fn default_page_size() -> u64 {
    20
}

/// Default number of buckets fetched per facet page.
const fn default_facet_page_size() -> u64 {
    10
}

fn default_sort_axis() -> String {
    String::from("modified")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u64,

    #[serde(default = "default_facet_page_size")]
    pub facet_page_size: u64,

    /// Axis used when relevance is selected without a query.
    #[serde(default = "default_sort_axis")]
    pub default_sort_axis: String,

    #[serde(default)]
    pub default_sort_order: SortOrder,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            facet_page_size: default_facet_page_size(),
            default_sort_axis: default_sort_axis(),
            default_sort_order: SortOrder::default(),
        }
    }
}

impl SearchConfig {
    /// The deterministic sort applied when relevance has nothing to rank.
    #[must_use]
    pub fn default_sorting(&self) -> Sorting {
        Sorting::by(self.default_sort_axis.clone(), self.default_sort_order)
    }
}
