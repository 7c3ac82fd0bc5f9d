//! # portal-search
//!
//! Search, filter, and facet state for Portal.
//!
//! [`SearchSession`] holds everything that defines the search being shown:
//! - query text, sort selection, and result page
//! - selected filter values per facet axis (see [`FilterState`])
//! - accumulated facet buckets with "load more" pagination (see [`FacetState`])
//! - the latest result count and items
//!
//! The session round-trips through URL query parameters and builds the
//! [`SearchParams`](portal_core::SearchParams) sent to a [`SearchBackend`].
//! Year-range filters are kept inside the selectable bounds with
//! [`adjust_value`].

mod backend;
mod browse;
mod error;
mod facets;
mod filters;
mod params;
mod range;
mod session;
mod summary;

pub use backend::SearchBackend;
pub use browse::{facet_items, hierarchy_items, BrowseItem};
pub use error::{BackendError, SearchError};
pub use facets::{FacetState, LoadMoreTicket};
pub use filters::FilterState;
pub use params::{parse_query_string, to_query_string, QueryParams};
pub use range::{adjust_value, bounds_from_buckets, Endpoint, YearRange};
pub use session::SearchSession;
pub use summary::{axis_label, summary};
