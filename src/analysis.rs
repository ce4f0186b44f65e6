//! Distribution analysis endpoints and the summaries computed from them.
//!
//! The server does the aggregation; the summaries here only reduce the
//! returned rows to the handful of headline numbers the dashboard shows.

use crate::client::CatalogClient;
use crate::error::Result;
use crate::parse::parse_rows;
use crate::types::{CategoryDistribution, CountryDistribution, YearDistribution};
use serde::Serialize;

/// Value sent for an unset analysis selector.
const ALL: &str = "all";

/// Rows in the "top countries" chart unless the caller picks another size.
pub const DEFAULT_TOP_COUNTRIES: usize = 10;

/// Category counted by [`countries_with_category`] when no category is selected.
pub const DEFAULT_CATEGORY_LETTER: &str = "W";

impl CatalogClient {
    /// Journals per country, optionally narrowed to one year range and category.
    pub async fn country_distribution(
        &self,
        year: Option<&str>,
        category: Option<&str>,
    ) -> Result<Vec<CountryDistribution>> {
        let body = self
            .get(
                "/api/analysis/country",
                &[("year", year.unwrap_or(ALL)), ("category", category.unwrap_or(ALL))],
            )
            .await?;
        parse_rows(&body)
    }

    /// Journals per category, optionally narrowed to one year range and country.
    pub async fn category_distribution(
        &self,
        year: Option<&str>,
        country: Option<&str>,
    ) -> Result<Vec<CategoryDistribution>> {
        let body = self
            .get(
                "/api/analysis/category",
                &[("year", year.unwrap_or(ALL)), ("country", country.unwrap_or(ALL))],
            )
            .await?;
        parse_rows(&body)
    }

    /// Category counts per publishing year, optionally for one country.
    pub async fn publishing_year_distribution(
        &self,
        country: Option<&str>,
    ) -> Result<Vec<YearDistribution>> {
        let body = self
            .get(
                "/api/analysis/publishing-year",
                &[("country", country.unwrap_or(ALL))],
            )
            .await?;
        parse_rows(&body)
    }
}

/// Headline numbers for the country tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountrySummary {
    pub total_countries: usize,
    /// Country with the most journals; the first listed wins a tie.
    pub top_country: Option<(String, u64)>,
    pub average_journals: Option<f64>,
}

impl CountrySummary {
    pub fn from_rows(rows: &[CountryDistribution]) -> Self {
        let mut top: Option<(&str, u64)> = None;
        let mut sum = 0u64;
        for row in rows {
            let count = row.journal_count.unwrap_or(0);
            sum += count;
            if top.map_or(true, |(_, best)| count > best) {
                top = Some((row.country_name.as_str(), count));
            }
        }

        Self {
            total_countries: rows.len(),
            top_country: top.map(|(name, count)| (name.to_string(), count)),
            average_journals: (!rows.is_empty()).then(|| sum as f64 / rows.len() as f64),
        }
    }

    /// Average formatted to two decimals, `-` when there are no rows.
    pub fn average_display(&self) -> String {
        match self.average_journals {
            Some(avg) => format!("{:.2}", avg),
            None => "-".to_string(),
        }
    }
}

/// The `n` countries with the most journals, largest first.
///
/// Ties keep the server's order.
pub fn top_countries(rows: &[CountryDistribution], n: usize) -> Vec<&CountryDistribution> {
    let mut ranked: Vec<&CountryDistribution> = rows.iter().collect();
    ranked.sort_by(|a, b| b.journal_count.unwrap_or(0).cmp(&a.journal_count.unwrap_or(0)));
    ranked.truncate(n);
    ranked
}

/// Number of countries with at least one journal in category `letter`.
pub fn countries_with_category(rows: &[CountryDistribution], letter: &str) -> usize {
    rows.iter()
        .filter(|row| row.category_count(letter).is_some_and(|count| count > 0))
        .count()
}

/// One row of the category summary table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub category_letter: String,
    pub journal_count: u64,
    /// Share of all journals, 0-100.
    pub percentage: f64,
    pub average_jpi: Option<f64>,
    pub countries_count: Option<u64>,
}

/// Headline numbers for the category tab.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    pub total_journals: u64,
    pub categories: Vec<CategoryShare>,
    /// The synthetic `All` row appended to the table.
    pub overall: CategoryShare,
}

impl CategorySummary {
    /// Summarize category rows; `countries` supplies the overall country count.
    pub fn from_rows(rows: &[CategoryDistribution], countries: &[CountryDistribution]) -> Self {
        let total: u64 = rows.iter().map(|r| r.journal_count.unwrap_or(0)).sum();

        let categories: Vec<CategoryShare> = rows
            .iter()
            .map(|r| {
                let count = r.journal_count.unwrap_or(0);
                CategoryShare {
                    category_letter: r.category_letter.clone(),
                    journal_count: count,
                    percentage: share(count, total),
                    average_jpi: r.average_jpi,
                    countries_count: r.countries_count,
                }
            })
            .collect();

        let overall_jpi = if rows.is_empty() {
            0.0
        } else {
            rows.iter().map(|r| r.average_jpi.unwrap_or(0.0)).sum::<f64>() / rows.len() as f64
        };

        Self {
            total_journals: total,
            overall: CategoryShare {
                category_letter: "All".to_string(),
                journal_count: total,
                percentage: 100.0,
                average_jpi: Some(overall_jpi),
                countries_count: Some(countries.len() as u64),
            },
            categories,
        }
    }

    /// Categories ordered by average JPI, highest first.
    pub fn ranked_by_jpi(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self
            .categories
            .iter()
            .map(|c| (c.category_letter.as_str(), c.average_jpi.unwrap_or(0.0)))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked
    }
}

fn share(count: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 / total as f64 * 100.0
    }
}
