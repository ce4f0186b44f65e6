//! Journal search endpoints.
//!
//! Covers: filtered (advanced) search and the single-field lookup.

use crate::client::CatalogClient;
use crate::error::{HjrsError, Result};
use crate::parse::{parse_journal_list, parse_search_payload};
use crate::query::SearchRequest;
use crate::types::{Journal, LookupKind, SearchResult};

impl CatalogClient {
    /// Run one page of an advanced search.
    pub async fn filtered_search(&self, request: &SearchRequest) -> Result<SearchResult> {
        let params = request.to_params();
        let params: Vec<(&str, &str)> = params.iter().map(|(k, v)| (*k, v.as_str())).collect();

        let body = self.get("/api/journals/filtered-search", &params).await?;
        parse_search_payload(&body, request.page)
    }

    /// Look journals up by title, ISSN, or e-ISSN.
    ///
    /// A blank query is rejected without contacting the server.
    pub async fn lookup(&self, kind: LookupKind, query: &str) -> Result<Vec<Journal>> {
        let query = query.trim();
        if query.is_empty() {
            return Err(HjrsError::InvalidQuery("Please enter a search term".to_string()));
        }

        let body = self
            .get(
                "/api/journals/search",
                &[("type", kind.as_api_str()), ("query", query)],
            )
            .await?;
        parse_journal_list(&body)
    }
}
