//! Performance prediction endpoint and the lookup helpers that feed it.
//!
//! A title/ISSN lookup returns one row per journal per year range. The
//! prediction screen collapses those rows into distinct journals and shows
//! each journal's rows as a JPI history.

use std::collections::HashSet;

use crate::client::CatalogClient;
use crate::error::{HjrsError, Result};
use crate::parse::parse_prediction;
use crate::types::{Journal, Prediction};
use serde::Serialize;

impl CatalogClient {
    /// Ask the remote model for a journal's next-year performance.
    pub async fn predict_performance(&self, title: &str, subject_area: &str) -> Result<Prediction> {
        let body = serde_json::json!({
            "title": title,
            "subject_area": subject_area,
        });

        let response_body = self
            .post_json("/api/prediction/predict-performance", &body)
            .await?;
        parse_prediction(&response_body)
    }

    /// Predict for a journal record taken from search results.
    pub async fn predict_for(&self, journal: &Journal) -> Result<Prediction> {
        let title = journal
            .title()
            .ok_or_else(|| HjrsError::InvalidQuery("Journal has no title".to_string()))?;
        let subject_area = journal
            .subject_area()
            .ok_or_else(|| HjrsError::InvalidQuery("Journal has no subject area".to_string()))?;
        self.predict_performance(title, subject_area).await
    }
}

/// Banner text for a failed prediction.
pub fn prediction_error_message(err: &HjrsError) -> String {
    format!("Prediction failed: {}", err)
}

/// Identity of a journal across its yearly rows.
fn distinct_key(journal: &Journal) -> (Option<&str>, Option<&str>, Option<&str>, Option<&str>) {
    (
        journal.title(),
        journal.issn(),
        journal.eissn(),
        journal.subject_area(),
    )
}

/// Collapse lookup rows to one per journal (title, ISSN, e-ISSN, subject area).
///
/// The first row of each journal is kept, in lookup order.
pub fn group_distinct(rows: &[Journal]) -> Vec<Journal> {
    let mut seen = HashSet::new();
    rows.iter()
        .filter(|row| seen.insert(distinct_key(row)))
        .cloned()
        .collect()
}

/// One year range of a journal's history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearRecord {
    pub year: String,
    /// `0.0` when the row has no usable JPI.
    pub jpi: f64,
    pub category: Option<String>,
    pub publisher: Option<String>,
    pub country: Option<String>,
}

/// Rows of `rows` that belong to `journal`, oldest year range first.
pub fn history_for(journal: &Journal, rows: &[Journal]) -> Vec<YearRecord> {
    let key = distinct_key(journal);
    let mut history: Vec<YearRecord> = rows
        .iter()
        .filter(|row| distinct_key(row) == key)
        .map(|row| YearRecord {
            year: row.year_range().unwrap_or_default().to_string(),
            jpi: row.jpi().filter(|j| j.is_finite()).unwrap_or(0.0),
            category: row.category().map(str::to_string),
            publisher: row.publisher().map(str::to_string),
            country: row.country().map(str::to_string),
        })
        .collect();
    history.sort_by(|a, b| a.year.cmp(&b.year));
    history
}
