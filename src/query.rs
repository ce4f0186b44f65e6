//! Filtered-search request construction.
//!
//! Maps a [`FilterState`] plus paging and sort settings onto the
//! `filtered-search` query string, and parses such a query string back.
//!
//! # Example
//!
//! ```
//! use hjrs_client::{FilterDimension, FilterState, PageSize, ScalarBound, SearchRequest};
//!
//! let mut filters = FilterState::new();
//! filters.toggle(FilterDimension::Country, "PK");
//! filters.toggle(FilterDimension::Country, "US");
//! filters.set_scalar(ScalarBound::MinJpi, Some(10.0));
//!
//! let request = SearchRequest::new(filters).page(2).page_size(PageSize::Fifty);
//! assert_eq!(
//!     request.to_query_string(),
//!     "country=PK%2CUS&minJpi=10&page=2&limit=50"
//! );
//! ```

use crate::error::{HjrsError, Result};
use crate::filters::{FilterDimension, FilterState, ScalarBound};
use crate::types::{PageSize, Sort, SortField, SortOrder};

/// Everything needed for one `filtered-search` call.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    pub filters: FilterState,
    /// 1-based page number.
    pub page: u32,
    pub page_size: PageSize,
    pub sort: Option<Sort>,
}

impl SearchRequest {
    pub fn new(filters: FilterState) -> Self {
        Self {
            filters,
            page: 1,
            page_size: PageSize::default(),
            sort: None,
        }
    }

    /// Set the page; values below 1 are raised to 1.
    pub fn page(mut self, page: u32) -> Self {
        self.page = page.max(1);
        self
    }

    pub fn page_size(mut self, page_size: PageSize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn sort(mut self, sort: Option<Sort>) -> Self {
        self.sort = sort;
        self
    }

    /// Query parameters in canonical order.
    ///
    /// Empty dimensions and unset bounds are omitted; multi-select ids are
    /// comma-joined in selection order.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();

        for dim in FilterDimension::ALL {
            let ids = self.filters.selected(dim);
            if !ids.is_empty() {
                params.push((dim.query_key(), ids.join(",")));
            }
        }

        for bound in [ScalarBound::MinJpi, ScalarBound::MaxJpi] {
            if let Some(v) = self.filters.scalar(bound) {
                params.push((bound.query_key(), v.to_string()));
            }
        }

        params.push(("page", self.page.to_string()));
        params.push(("limit", self.page_size.get().to_string()));

        if let Some(sort) = self.sort {
            params.push(("sortBy", sort.field.as_api_str().to_string()));
            params.push(("sortOrder", sort.order.as_api_str().to_string()));
        }

        params
    }

    /// URL-encoded query string (no leading `?`).
    pub fn to_query_string(&self) -> String {
        url::form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.to_params())
            .finish()
    }

    /// Rebuild a request from a query string produced by [`Self::to_query_string`].
    ///
    /// Unknown keys are ignored. A missing `page` means page 1 and a missing
    /// `limit` means the default page size.
    pub fn from_query_string(query: &str) -> Result<Self> {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut request = Self::new(FilterState::new());
        let mut sort_field = None;
        let mut sort_order = None;

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            if let Some(dim) = FilterDimension::from_query_key(&key) {
                for id in value.split(',').map(str::trim).filter(|id| !id.is_empty()) {
                    if !request.filters.is_selected(dim, id) {
                        request.filters.toggle(dim, id);
                    }
                }
                continue;
            }

            match &*key {
                "minJpi" => set_bound(&mut request.filters, ScalarBound::MinJpi, &value)?,
                "maxJpi" => set_bound(&mut request.filters, ScalarBound::MaxJpi, &value)?,
                "page" => {
                    request.page = value
                        .parse::<u32>()
                        .ok()
                        .filter(|p| *p >= 1)
                        .ok_or_else(|| HjrsError::InvalidQuery(format!("Invalid page: {}", value)))?;
                }
                "limit" => {
                    request.page_size = value
                        .parse::<u32>()
                        .ok()
                        .and_then(PageSize::from_u32)
                        .ok_or_else(|| HjrsError::InvalidQuery(format!("Invalid limit: {}", value)))?;
                }
                "sortBy" => {
                    sort_field = Some(SortField::from_str_loose(&value).ok_or_else(|| {
                        HjrsError::InvalidQuery(format!("Invalid sortBy: {}", value))
                    })?);
                }
                "sortOrder" => {
                    sort_order = Some(SortOrder::from_str_loose(&value).ok_or_else(|| {
                        HjrsError::InvalidQuery(format!("Invalid sortOrder: {}", value))
                    })?);
                }
                _ => {}
            }
        }

        request.sort = sort_field.map(|field| Sort::new(field, sort_order.unwrap_or(SortOrder::Desc)));
        Ok(request)
    }
}

fn set_bound(filters: &mut FilterState, bound: ScalarBound, value: &str) -> Result<()> {
    let parsed = value
        .trim()
        .parse::<f64>()
        .map_err(|_| HjrsError::InvalidQuery(format!("Invalid {}: {}", bound.query_key(), value)))?;
    // the bound may be rejected for ordering, so compare against what was stored
    filters.set_scalar(bound, Some(parsed));
    if filters.scalar(bound) != Some(parsed) {
        return Err(HjrsError::InvalidQuery(format!(
            "{} out of range: {}",
            bound.query_key(),
            value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_filters() -> FilterState {
        let mut filters = FilterState::new();
        filters.toggle(FilterDimension::Country, "PK");
        filters.toggle(FilterDimension::Country, "US");
        filters.set_scalar(ScalarBound::MinJpi, Some(10.0));
        filters.set_scalar(ScalarBound::MaxJpi, Some(90.0));
        filters
    }

    #[test]
    fn test_params_canonical_order() {
        let mut filters = sample_filters();
        filters.toggle(FilterDimension::Category, "3");
        let request = SearchRequest::new(filters)
            .page(2)
            .page_size(PageSize::Fifty)
            .sort(Some(Sort::jpi_desc()));
        let params = request.to_params();
        let keys: Vec<&str> = params.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            ["country", "category", "minJpi", "maxJpi", "page", "limit", "sortBy", "sortOrder"]
        );
        assert_eq!(params[0].1, "PK,US");
        assert_eq!(params[2].1, "10");
        assert_eq!(params[5].1, "50");
    }

    #[test]
    fn test_round_trip_reconstructs_filters() {
        let request = SearchRequest::new(sample_filters())
            .page(2)
            .page_size(PageSize::Fifty);
        let parsed = SearchRequest::from_query_string(&request.to_query_string()).unwrap();
        assert_eq!(parsed, request);
        assert_eq!(parsed.filters.selected(FilterDimension::Country), ["PK", "US"]);
    }

    #[test]
    fn test_round_trip_with_sort_and_fraction() {
        let mut filters = FilterState::new();
        filters.toggle(FilterDimension::SubjectSubcategory, "12");
        filters.set_scalar(ScalarBound::MaxJpi, Some(72.5));
        let request = SearchRequest::new(filters)
            .sort(Some(Sort::new(SortField::Year, SortOrder::Asc)));
        let qs = request.to_query_string();
        assert!(qs.contains("maxJpi=72.5"));
        assert_eq!(SearchRequest::from_query_string(&qs).unwrap(), request);
    }

    #[test]
    fn test_round_trip_keeps_reserved_characters_in_ids() {
        let mut filters = FilterState::new();
        filters.toggle(FilterDimension::Publisher, "Smith & Co");
        filters.toggle(FilterDimension::Publisher, "A=B");
        // rejected: would split into two ids on the way back
        filters.toggle(FilterDimension::Publisher, "Smith, Jones");
        let request = SearchRequest::new(filters);
        let parsed = SearchRequest::from_query_string(&request.to_query_string()).unwrap();
        assert_eq!(
            parsed.filters.selected(FilterDimension::Publisher),
            ["Smith & Co", "A=B"]
        );
        assert_eq!(parsed, request);
    }

    #[test]
    fn test_empty_filters_only_paging() {
        let request = SearchRequest::new(FilterState::new());
        assert_eq!(request.to_query_string(), "page=1&limit=25");
    }

    #[test]
    fn test_page_zero_raised() {
        assert_eq!(SearchRequest::new(FilterState::new()).page(0).page, 1);
    }

    #[test]
    fn test_parse_rejects_bad_limit() {
        let err = SearchRequest::from_query_string("page=1&limit=30").unwrap_err();
        assert!(matches!(err, HjrsError::InvalidQuery(_)));
    }

    #[test]
    fn test_parse_rejects_inverted_range() {
        assert!(SearchRequest::from_query_string("minJpi=50&maxJpi=30").is_err());
    }

    #[test]
    fn test_parse_ignores_unknown_and_leading_question_mark() {
        let request = SearchRequest::from_query_string("?country=1&foo=bar").unwrap();
        assert_eq!(request.filters.selected(FilterDimension::Country), ["1"]);
        assert_eq!(request.page, 1);
        assert_eq!(request.page_size, PageSize::TwentyFive);
    }
}
