//! Reference lists backing the filter dropdowns.
//!
//! Loaded once per screen. Each list is fetched independently; a failed
//! list is logged and left empty, the others still load.

use crate::client::CatalogClient;
use crate::error::Result;
use crate::filters::FilterDimension;
use crate::parse::parse_options;
use crate::types::FilterOption;
use std::collections::BTreeMap;

/// Endpoint and column names of one reference table.
struct ReferenceTable {
    path: &'static str,
    id_field: &'static str,
    label_field: &'static str,
}

fn table(dimension: FilterDimension) -> ReferenceTable {
    let (path, id_field, label_field) = match dimension {
        FilterDimension::Country => ("/api/reference/countries", "country_id", "country_name"),
        FilterDimension::Year => ("/api/reference/publishing-years", "year_id", "range_val"),
        FilterDimension::Category => ("/api/reference/categories", "category_id", "category_letter"),
        // subcategories live in the subject-area table
        FilterDimension::SubjectArea | FilterDimension::SubjectSubcategory => (
            "/api/reference/subject-areas",
            "subject_area_id",
            "subject_area_name",
        ),
        FilterDimension::Publisher => ("/api/reference/publishers", "publisher_id", "publisher_name"),
    };
    ReferenceTable {
        path,
        id_field,
        label_field,
    }
}

impl CatalogClient {
    /// Fetch the option list for one filter dimension.
    pub async fn reference_options(&self, dimension: FilterDimension) -> Result<Vec<FilterOption>> {
        let table = table(dimension);
        let body = self.get(table.path, &[]).await?;
        parse_options(&body, table.id_field, table.label_field)
    }
}

/// Option lists per filter dimension; read-only once loaded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReferenceCache {
    options: BTreeMap<FilterDimension, Vec<FilterOption>>,
}

impl ReferenceCache {
    /// Fetch every list concurrently. Never fails; see module docs.
    pub async fn load(client: &CatalogClient) -> Self {
        let (countries, years, categories, subject_areas, publishers) = tokio::join!(
            client.reference_options(FilterDimension::Country),
            client.reference_options(FilterDimension::Year),
            client.reference_options(FilterDimension::Category),
            client.reference_options(FilterDimension::SubjectArea),
            client.reference_options(FilterDimension::Publisher),
        );

        let mut options = BTreeMap::new();
        for (dimension, loaded) in [
            (FilterDimension::Country, countries),
            (FilterDimension::Year, years),
            (FilterDimension::Category, categories),
            (FilterDimension::SubjectArea, subject_areas),
            (FilterDimension::Publisher, publishers),
        ] {
            let list = loaded.unwrap_or_else(|e| {
                tracing::warn!(?dimension, error = %e, "reference list unavailable");
                Vec::new()
            });
            options.insert(dimension, list);
        }

        let subcategories = options
            .get(&FilterDimension::SubjectArea)
            .cloned()
            .unwrap_or_default();
        options.insert(FilterDimension::SubjectSubcategory, subcategories);

        tracing::info!(
            loaded = options.values().filter(|l| !l.is_empty()).count(),
            "reference lists loaded"
        );
        Self { options }
    }

    /// Build a cache from already-known lists.
    pub fn from_lists(lists: impl IntoIterator<Item = (FilterDimension, Vec<FilterOption>)>) -> Self {
        Self {
            options: lists.into_iter().collect(),
        }
    }

    pub fn get_options(&self, dimension: FilterDimension) -> &[FilterOption] {
        self.options.get(&dimension).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn find(&self, dimension: FilterDimension, id: &str) -> Option<&FilterOption> {
        self.get_options(dimension).iter().find(|o| o.id == id)
    }

    /// Display label for a selected id; unknown ids render as `Unknown (<id>)`.
    pub fn label(&self, dimension: FilterDimension, id: &str) -> String {
        match self.find(dimension, id) {
            Some(option) => option.label.clone(),
            None => format!("Unknown ({})", id),
        }
    }

    /// Resolve a user-typed value to an option id, matching id first, then label case-insensitively.
    pub fn resolve(&self, dimension: FilterDimension, value: &str) -> Option<&FilterOption> {
        let value = value.trim();
        self.find(dimension, value).or_else(|| {
            self.get_options(dimension)
                .iter()
                .find(|o| o.label.eq_ignore_ascii_case(value))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cache() -> ReferenceCache {
        ReferenceCache::from_lists([(
            FilterDimension::Country,
            vec![
                FilterOption::new("1", "Pakistan"),
                FilterOption::new("2", "United States"),
            ],
        )])
    }

    #[test]
    fn test_missing_dimension_is_empty() {
        assert!(cache().get_options(FilterDimension::Publisher).is_empty());
    }

    #[test]
    fn test_label_lookup() {
        let cache = cache();
        assert_eq!(cache.label(FilterDimension::Country, "2"), "United States");
        assert_eq!(cache.label(FilterDimension::Country, "9"), "Unknown (9)");
    }

    #[test]
    fn test_resolve_by_id_or_label() {
        let cache = cache();
        assert_eq!(cache.resolve(FilterDimension::Country, "1").map(|o| o.id.as_str()), Some("1"));
        assert_eq!(
            cache.resolve(FilterDimension::Country, "united states").map(|o| o.id.as_str()),
            Some("2")
        );
        assert!(cache.resolve(FilterDimension::Country, "France").is_none());
    }

    #[test]
    fn test_subcategory_shares_subject_area_table() {
        assert_eq!(
            table(FilterDimension::SubjectSubcategory).path,
            table(FilterDimension::SubjectArea).path
        );
    }
}
