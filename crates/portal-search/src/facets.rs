//! Accumulated facet buckets and "load more" pagination.

use std::collections::{BTreeMap, HashSet};

use portal_core::{Bucket, SearchResultsFacet};

/// Permission to fetch the next bucket page of one axis.
///
/// Handed out by [`FacetState::begin_load_more`]; must be returned through
/// [`FacetState::finish_load_more`] or [`FacetState::cancel_load_more`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadMoreTicket {
    pub axis: String,
    /// Bucket offset to request.
    pub offset: u64,
    generation: u64,
}

/// Facet data of the current search, keyed by axis.
#[derive(Debug, Clone, Default)]
pub struct FacetState {
    facets: BTreeMap<String, SearchResultsFacet>,
    generation: u64,
    in_flight: HashSet<String>,
}

fn append_unique(target: &mut Vec<Bucket>, buckets: Vec<Bucket>) -> usize {
    let mut seen: HashSet<String> = target.iter().map(|b| b.value.clone()).collect();
    let before = target.len();
    for bucket in buckets {
        if seen.insert(bucket.value.clone()) {
            target.push(bucket);
        }
    }
    target.len() - before
}

fn to_u64(n: usize) -> u64 {
    u64::try_from(n).unwrap_or(u64::MAX)
}

impl FacetState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace all facet data with a fresh response.
    ///
    /// Buckets are deduplicated by value. Pending "load more" requests become
    /// stale and their results will be discarded.
    pub fn set_facets(&mut self, facets: Vec<SearchResultsFacet>) {
        self.facets.clear();
        for facet in facets {
            let mut buckets = Vec::with_capacity(facet.buckets.len());
            append_unique(&mut buckets, facet.buckets);
            self.facets.insert(
                facet.axis.clone(),
                SearchResultsFacet {
                    axis: facet.axis,
                    buckets,
                    bucket_no: facet.bucket_no,
                },
            );
        }
        self.generation += 1;
        self.in_flight.clear();
    }

    /// Append buckets after the accumulated ones, skipping known values.
    /// Returns the number of buckets added.
    pub fn add_facet_buckets(&mut self, axis: &str, buckets: Vec<Bucket>) -> usize {
        let facet = self
            .facets
            .entry(axis.to_string())
            .or_insert_with(|| SearchResultsFacet {
                axis: axis.to_string(),
                buckets: Vec::new(),
                bucket_no: 0,
            });
        let added = append_unique(&mut facet.buckets, buckets);
        facet.bucket_no = facet.bucket_no.max(to_u64(facet.buckets.len()));
        added
    }

    /// Whether the backend has buckets beyond the accumulated ones.
    #[must_use]
    pub fn has_more_buckets(&self, axis: &str) -> bool {
        self.facets
            .get(axis)
            .is_some_and(|f| to_u64(f.buckets.len()) < f.bucket_no)
    }

    /// Offset of the next bucket page: the accumulated bucket count.
    #[must_use]
    pub fn get_facet_offset(&self, axis: &str) -> u64 {
        self.facets.get(axis).map_or(0, |f| to_u64(f.buckets.len()))
    }

    #[must_use]
    pub fn get(&self, axis: &str) -> Option<&SearchResultsFacet> {
        self.facets.get(axis)
    }

    pub fn iter(&self) -> impl Iterator<Item = &SearchResultsFacet> {
        self.facets.values()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    /// Incremented whenever a new response replaces the facet data.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// Start fetching the next bucket page of `axis`.
    ///
    /// Returns `None` while another request for the same axis is in flight.
    pub fn begin_load_more(&mut self, axis: &str) -> Option<LoadMoreTicket> {
        if !self.in_flight.insert(axis.to_string()) {
            tracing::debug!(axis, "load more already in flight");
            return None;
        }
        Some(LoadMoreTicket {
            axis: axis.to_string(),
            offset: self.get_facet_offset(axis),
            generation: self.generation,
        })
    }

    /// Merge a fetched bucket page. Returns `false` (and drops the page) if a
    /// newer response replaced the facets since the ticket was issued.
    pub fn finish_load_more(&mut self, ticket: LoadMoreTicket, page: SearchResultsFacet) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                axis = %ticket.axis,
                ticket = ticket.generation,
                current = self.generation,
                "discarding stale facet page"
            );
            return false;
        }
        self.in_flight.remove(&ticket.axis);
        self.add_facet_buckets(&ticket.axis, page.buckets);
        if let Some(facet) = self.facets.get_mut(&ticket.axis) {
            facet.bucket_no = page.bucket_no.max(to_u64(facet.buckets.len()));
        }
        true
    }

    /// Release a ticket without merging anything.
    pub fn cancel_load_more(&mut self, ticket: &LoadMoreTicket) {
        if ticket.generation == self.generation {
            self.in_flight.remove(&ticket.axis);
        }
    }

    #[must_use]
    pub fn is_loading(&self, axis: &str) -> bool {
        self.in_flight.contains(axis)
    }
}
