//! The current search: query, sorting, page, filters, and results.

use portal_config::SearchConfig;
use portal_core::{
    Bucket, FacetRequest, FacetType, FilterParam, Hierarchy, HierarchyRequest, Item, SearchFacet,
    SearchParams, SearchResponse, SortOrder, SortSpec, Sorting,
};

use crate::backend::SearchBackend;
use crate::error::SearchError;
use crate::facets::{FacetState, LoadMoreTicket};
use crate::filters::FilterState;
use crate::params::{QueryParams, ORDER_KEY, PAGE_KEY, QUERY_KEY, RELEVANCE, SORT_KEY};
use crate::range::{adjust_value, bounds_from_buckets, YearRange};

/// Single source of truth for what search is being shown.
///
/// All state changes are synchronous; only [`search`](Self::search),
/// [`load_more`](Self::load_more) and [`browse`](Self::browse) talk to the
/// backend. Changing the query, sorting, or filters returns to page 1.
#[derive(Debug, Clone)]
pub struct SearchSession {
    config: SearchConfig,
    facet_config: Vec<SearchFacet>,
    query: String,
    sorting: Sorting,
    page: u64,
    filters: FilterState,
    facets: FacetState,
    num_found: u64,
    items: Vec<Item>,
}

impl SearchSession {
    #[must_use]
    pub fn new(config: SearchConfig, facet_config: Vec<SearchFacet>) -> Self {
        Self {
            config,
            facet_config,
            query: String::new(),
            sorting: Sorting::default(),
            page: 1,
            filters: FilterState::new(),
            facets: FacetState::new(),
            num_found: 0,
            items: Vec::new(),
        }
    }

    /// Session initialized from URL query parameters.
    #[must_use]
    pub fn from_query_params(
        config: SearchConfig,
        facet_config: Vec<SearchFacet>,
        params: &[(String, String)],
    ) -> Self {
        let mut session = Self::new(config, facet_config);
        session.load_query_params(params);
        session
    }

    // -----------------------------------------------------------------------
    // Accessors
    // -----------------------------------------------------------------------

    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The stored sort selection, as chosen by the user.
    #[must_use]
    pub const fn sorting(&self) -> &Sorting {
        &self.sorting
    }

    #[must_use]
    pub const fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub const fn facets(&self) -> &FacetState {
        &self.facets
    }

    #[must_use]
    pub fn facet_config(&self) -> &[SearchFacet] {
        &self.facet_config
    }

    #[must_use]
    pub fn facet(&self, axis: &str) -> Option<&SearchFacet> {
        self.facet_config.iter().find(|f| f.name == axis)
    }

    #[must_use]
    pub const fn config(&self) -> &SearchConfig {
        &self.config
    }

    #[must_use]
    pub const fn num_found(&self) -> u64 {
        self.num_found
    }

    #[must_use]
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    // -----------------------------------------------------------------------
    // Query, sorting, paging
    // -----------------------------------------------------------------------

    /// Replace the query. Does not fetch.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.page = 1;
    }

    pub fn set_sorting(&mut self, sorting: Sorting) {
        self.sorting = sorting;
        self.page = 1;
    }

    /// The sorting actually sent to the backend.
    ///
    /// Relevance needs a query to rank by; with an empty query the configured
    /// default sort applies instead.
    #[must_use]
    pub fn effective_sorting(&self) -> Sorting {
        if self.sorting.is_relevance() && self.query.trim().is_empty() {
            self.config.default_sorting()
        } else {
            self.sorting.clone()
        }
    }

    /// Select a 1-based result page. Page 0 is treated as page 1.
    pub fn set_page(&mut self, page: u64) {
        self.page = page.max(1);
    }

    /// Result offset of the current page.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.config.page_size)
    }

    // -----------------------------------------------------------------------
    // Filters
    // -----------------------------------------------------------------------

    /// Select `value` on `axis`.
    ///
    /// Year-range axes hold a single range, replaced on every call; values
    /// that do not parse as a range are dropped. Unconfigured axes are
    /// ignored. Returns whether the state changed.
    pub fn add_filter(&mut self, axis: &str, value: &str) -> bool {
        let Some(facet_type) = self.facet(axis).map(|f| f.facet_type) else {
            tracing::debug!(axis, "ignoring filter on unconfigured axis");
            return false;
        };
        let changed = match facet_type {
            FacetType::YearRange => match YearRange::parse(value) {
                Some(range) => self.filters.replace(axis, &range.to_string()),
                None => {
                    tracing::debug!(axis, value, "dropping malformed year range");
                    false
                }
            },
            FacetType::Exact | FacetType::Hierarchy => self.filters.add(axis, value),
        };
        if changed {
            self.page = 1;
        }
        changed
    }

    /// Deselect `value` on `axis`. Removing an absent value is a no-op.
    pub fn remove_filter(&mut self, axis: &str, value: &str) -> bool {
        let changed = self.filters.remove(axis, value);
        if changed {
            self.page = 1;
        }
        changed
    }

    pub fn reset_filters(&mut self) {
        if !self.filters.is_empty() {
            self.filters.clear();
            self.page = 1;
        }
    }

    /// Current year-range selection of `axis`.
    #[must_use]
    pub fn year_range(&self, axis: &str) -> Option<YearRange> {
        self.filters
            .values(axis)?
            .iter()
            .next()
            .and_then(|v| YearRange::parse(v))
    }

    // -----------------------------------------------------------------------
    // URL parameters
    // -----------------------------------------------------------------------

    /// Replace query, page, sorting and filters from URL parameters.
    ///
    /// Unknown keys are ignored; malformed pages, sort orders and ranges are
    /// dropped.
    pub fn load_query_params(&mut self, params: &[(String, String)]) {
        self.query.clear();
        self.sorting = Sorting::default();
        self.filters.clear();
        let mut page = 1;

        for (key, value) in params {
            match key.as_str() {
                QUERY_KEY => self.query.clone_from(value),
                PAGE_KEY => match value.trim().parse::<u64>() {
                    Ok(n) if n > 0 => page = n,
                    _ => tracing::debug!(value, "dropping malformed page"),
                },
                SORT_KEY => {
                    self.sorting.axis = (value != RELEVANCE && !value.is_empty()).then(|| value.clone());
                }
                ORDER_KEY => match SortOrder::parse(value) {
                    Some(order) => self.sorting.order = order,
                    None => tracing::debug!(value, "dropping unknown sort order"),
                },
                axis if self.facet(axis).is_some() => {
                    self.add_filter(axis, value);
                }
                _ => {}
            }
        }
        self.page = page;
    }

    /// Serialize the state to URL parameters.
    ///
    /// Defaults (empty query, page 1, relevance descending) are omitted.
    /// Filters follow facet configuration order.
    #[must_use]
    pub fn to_query_params(&self) -> QueryParams {
        let mut params = Vec::new();
        if !self.query.is_empty() {
            params.push((QUERY_KEY.to_string(), self.query.clone()));
        }
        if self.page > 1 {
            params.push((PAGE_KEY.to_string(), self.page.to_string()));
        }
        if self.sorting != Sorting::default() {
            let sort = self.sorting.axis.as_deref().unwrap_or(RELEVANCE);
            params.push((SORT_KEY.to_string(), sort.to_string()));
            params.push((ORDER_KEY.to_string(), self.sorting.order.to_string()));
        }
        for facet in &self.facet_config {
            if let Some(values) = self.filters.values(&facet.name) {
                params.extend(values.iter().map(|v| (facet.name.clone(), v.clone())));
            }
        }
        params
    }

    // -----------------------------------------------------------------------
    // Facets
    // -----------------------------------------------------------------------

    pub fn add_facet_buckets(&mut self, axis: &str, buckets: Vec<Bucket>) -> usize {
        self.facets.add_facet_buckets(axis, buckets)
    }

    #[must_use]
    pub fn has_more_buckets(&self, axis: &str) -> bool {
        self.facets.has_more_buckets(axis)
    }

    #[must_use]
    pub fn get_facet_offset(&self, axis: &str) -> u64 {
        self.facets.get_facet_offset(axis)
    }

    /// See [`FacetState::begin_load_more`].
    pub fn begin_load_more(&mut self, axis: &str) -> Option<LoadMoreTicket> {
        self.facets.begin_load_more(axis)
    }

    /// See [`FacetState::finish_load_more`].
    pub fn finish_load_more(&mut self, ticket: LoadMoreTicket, page: portal_core::SearchResultsFacet) -> bool {
        self.facets.finish_load_more(ticket, page)
    }

    pub fn cancel_load_more(&mut self, ticket: &LoadMoreTicket) {
        self.facets.cancel_load_more(ticket);
    }

    // -----------------------------------------------------------------------
    // Backend requests
    // -----------------------------------------------------------------------

    fn filter_params(&self) -> Vec<FilterParam> {
        self.facet_config
            .iter()
            .filter_map(|facet| {
                let values = self.filters.values(&facet.name)?;
                Some(FilterParam {
                    axis: facet.name.clone(),
                    facet_type: facet.facet_type,
                    values: values.iter().cloned().collect(),
                })
            })
            .collect()
    }

    fn sort_spec(&self) -> Option<SortSpec> {
        let sorting = self.effective_sorting();
        sorting.axis.map(|axis| SortSpec {
            axis,
            order: sorting.order,
        })
    }

    /// Backend parameters for the current page, requesting the first bucket
    /// page of every configured facet.
    #[must_use]
    pub fn build_params(&self) -> SearchParams {
        SearchParams {
            query: self.query.clone(),
            offset: self.offset(),
            limit: self.config.page_size,
            filters: self.filter_params(),
            facets: self
                .facet_config
                .iter()
                .map(|facet| FacetRequest {
                    axis: facet.name.clone(),
                    offset: 0,
                    limit: self.config.facet_page_size,
                })
                .collect(),
            sort: self.sort_spec(),
        }
    }

    /// Parameters fetching only the next bucket page of one axis.
    fn load_more_params(&self, ticket: &LoadMoreTicket) -> SearchParams {
        SearchParams {
            query: self.query.clone(),
            offset: 0,
            limit: 0,
            filters: self.filter_params(),
            facets: vec![FacetRequest {
                axis: ticket.axis.clone(),
                offset: ticket.offset,
                limit: self.config.facet_page_size,
            }],
            sort: None,
        }
    }

    /// Store a search response.
    ///
    /// Facets of unconfigured axes are ignored and missing facets are simply
    /// absent. Year-range selections are re-clamped into the new bucket
    /// domain.
    pub fn apply_response(&mut self, response: SearchResponse) {
        let SearchResponse {
            num_found,
            items,
            facets,
        } = response;
        self.num_found = num_found;
        self.items = items;

        let facets = facets
            .into_iter()
            .filter(|facet| {
                let known = self.facet(&facet.axis).is_some();
                if !known {
                    tracing::debug!(axis = %facet.axis, "ignoring facet for unconfigured axis");
                }
                known
            })
            .collect();
        self.facets.set_facets(facets);
        self.reclamp_year_ranges();
    }

    fn reclamp_year_ranges(&mut self) {
        let axes: Vec<String> = self
            .facet_config
            .iter()
            .filter(|f| f.facet_type == FacetType::YearRange)
            .map(|f| f.name.clone())
            .collect();

        for axis in axes {
            let Some(current) = self.year_range(&axis) else {
                continue;
            };
            let Some(bounds) = self
                .facets
                .get(&axis)
                .and_then(|facet| bounds_from_buckets(&facet.buckets))
            else {
                continue;
            };
            let adjusted = adjust_value(current, None, bounds);
            if adjusted != current {
                tracing::debug!(axis, from = %current, to = %adjusted, "re-clamping year range");
                self.filters.replace(&axis, &adjusted.to_string());
            }
        }
    }

    /// Run the current search and store the response.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Backend`] if the backend fails; the session is
    /// left unchanged.
    pub async fn search<B: SearchBackend>(&mut self, backend: &B) -> Result<u64, SearchError> {
        let params = self.build_params();
        let response = backend
            .fetch_results(&params)
            .await
            .map_err(SearchError::backend)?;
        self.apply_response(response);
        Ok(self.num_found)
    }

    /// Fetch the next bucket page of `axis`.
    ///
    /// Returns `Ok(false)` if a request for the axis is already running, the
    /// response carried no facet for it, or a newer search made it stale.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownAxis`] for unconfigured axes and
    /// [`SearchError::Backend`] if the backend fails.
    pub async fn load_more<B: SearchBackend>(
        &mut self,
        backend: &B,
        axis: &str,
    ) -> Result<bool, SearchError> {
        if self.facet(axis).is_none() {
            return Err(SearchError::UnknownAxis(axis.to_string()));
        }
        let Some(ticket) = self.begin_load_more(axis) else {
            return Ok(false);
        };

        let params = self.load_more_params(&ticket);
        let response = match backend.fetch_results(&params).await {
            Ok(response) => response,
            Err(error) => {
                self.cancel_load_more(&ticket);
                return Err(SearchError::backend(error));
            }
        };

        match response.facets.into_iter().find(|f| f.axis == ticket.axis) {
            Some(page) => Ok(self.finish_load_more(ticket, page)),
            None => {
                tracing::debug!(axis, "load more response carried no facet");
                self.cancel_load_more(&ticket);
                Ok(false)
            }
        }
    }

    /// Fetch the children of `parent` (roots when `None`) on a hierarchy axis.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::UnknownAxis`] for unconfigured axes and
    /// [`SearchError::Backend`] if the backend fails.
    pub async fn browse<B: SearchBackend>(
        &self,
        backend: &B,
        axis: &str,
        parent: Option<&str>,
    ) -> Result<Hierarchy, SearchError> {
        if self.facet(axis).is_none() {
            return Err(SearchError::UnknownAxis(axis.to_string()));
        }
        let request = HierarchyRequest {
            axis: axis.to_string(),
            parent: parent.map(str::to_string),
        };
        backend
            .fetch_hierarchy(&request)
            .await
            .map_err(SearchError::backend)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use portal_core::SearchResultsFacet;
    use pretty_assertions::assert_eq;

    fn facets() -> Vec<SearchFacet> {
        vec![
            SearchFacet::new("type", "entity_type", FacetType::Exact),
            SearchFacet::new("year", "published", FacetType::YearRange),
            SearchFacet::new("subject", "subject", FacetType::Hierarchy),
        ]
    }

    fn session() -> SearchSession {
        SearchSession::new(SearchConfig::default(), facets())
    }

    fn pairs(items: &[(&str, &str)]) -> QueryParams {
        items
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn relevance_without_query_uses_default_sort() {
        let mut s = session();
        s.set_sorting(Sorting::relevance());
        assert_eq!(s.effective_sorting(), Sorting::by("modified", SortOrder::Desc));
        assert!(s.sorting().is_relevance());

        s.set_query("moomin");
        assert!(s.effective_sorting().is_relevance());
        assert_eq!(s.build_params().sort, None);
    }

    #[test]
    fn explicit_sort_is_kept() {
        let mut s = session();
        s.set_sorting(Sorting::by("title", SortOrder::Asc));
        assert_eq!(
            s.build_params().sort,
            Some(SortSpec {
                axis: "title".into(),
                order: SortOrder::Asc
            })
        );
    }

    #[test]
    fn filter_changes_return_to_first_page() {
        let mut s = session();
        s.set_page(3);
        assert_eq!(s.offset(), 40);
        s.add_filter("type", "book");
        assert_eq!(s.page(), 1);

        s.set_page(2);
        assert!(!s.add_filter("type", "book"));
        assert_eq!(s.page(), 2);
    }

    #[test]
    fn year_range_filter_is_single_valued() {
        let mut s = session();
        assert!(s.add_filter("year", "2000-2010"));
        assert!(s.add_filter("year", "2005-2015"));
        assert!(!s.add_filter("year", "garbage"));
        assert_eq!(s.year_range("year"), Some(YearRange::new(2005, 2015)));
        assert_eq!(s.filters().values("year").map(std::collections::BTreeSet::len), Some(1));
    }

    #[test]
    fn unconfigured_axes_are_ignored() {
        let mut s = session();
        assert!(!s.add_filter("colour", "red"));
        assert!(s.filters().is_empty());
    }

    #[test]
    fn query_params_round_trip() {
        let input = pairs(&[
            ("q", "moomin valley"),
            ("page", "3"),
            ("sort", "title"),
            ("order", "asc"),
            ("type", "film"),
            ("type", "book"),
            ("year", "1945-1970"),
            ("utm_source", "mail"),
        ]);
        let s = SearchSession::from_query_params(SearchConfig::default(), facets(), &input);
        assert_eq!(s.query(), "moomin valley");
        assert_eq!(s.page(), 3);
        assert_eq!(s.sorting(), &Sorting::by("title", SortOrder::Asc));

        let mut output = s.to_query_params();
        let mut expected: QueryParams = input.into_iter().filter(|(k, _)| k != "utm_source").collect();
        output.sort();
        expected.sort();
        assert_eq!(output, expected);
    }

    #[test]
    fn malformed_params_are_dropped() {
        let s = SearchSession::from_query_params(
            SearchConfig::default(),
            facets(),
            &pairs(&[
                ("page", "two"),
                ("order", "sideways"),
                ("year", "abc-def"),
                ("type", "book"),
            ]),
        );
        assert_eq!(s.page(), 1);
        assert_eq!(s.sorting(), &Sorting::default());
        assert!(s.filters().values("year").is_none());
        assert_eq!(s.to_query_params(), pairs(&[("type", "book")]));
    }

    #[test]
    fn relevance_sort_round_trips() {
        let params = pairs(&[("q", "x"), ("sort", "relevance"), ("order", "asc")]);
        let s = SearchSession::from_query_params(SearchConfig::default(), facets(), &params);
        assert!(s.sorting().is_relevance());
        assert_eq!(s.to_query_params(), params);
    }

    #[test]
    fn build_params_requests_every_facet() {
        let mut s = session();
        s.add_filter("type", "book");
        s.add_filter("year", "1990-2000");
        let params = s.build_params();
        assert_eq!(params.limit, 20);
        assert_eq!(params.facets.len(), 3);
        assert!(params.facets.iter().all(|f| f.offset == 0 && f.limit == 10));
        assert_eq!(
            params.filters,
            vec![
                FilterParam {
                    axis: "type".into(),
                    facet_type: FacetType::Exact,
                    values: vec!["book".into()],
                },
                FilterParam {
                    axis: "year".into(),
                    facet_type: FacetType::YearRange,
                    values: vec!["1990-2000".into()],
                },
            ]
        );
    }

    #[test]
    fn apply_response_filters_axes_and_reclamps() {
        let mut s = session();
        s.add_filter("year", "1990-2030");
        s.apply_response(SearchResponse {
            num_found: 7,
            items: vec![Item::new("1", "book", "B-1")],
            facets: vec![
                SearchResultsFacet {
                    axis: "year".into(),
                    buckets: vec![Bucket::new("2000", 1), Bucket::new("2020", 2)],
                    bucket_no: 2,
                },
                SearchResultsFacet {
                    axis: "colour".into(),
                    buckets: vec![Bucket::new("red", 1)],
                    bucket_no: 1,
                },
            ],
        });
        assert_eq!(s.num_found(), 7);
        assert_eq!(s.items().len(), 1);
        assert!(s.facets().get("colour").is_none());
        assert!(s.facets().get("type").is_none());
        assert_eq!(s.year_range("year"), Some(YearRange::new(2000, 2020)));
    }
}
