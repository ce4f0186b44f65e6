//! Public types for the HJRS client.
//!
//! Journals are kept as raw JSON objects: the catalog backend owns their
//! shape and this crate only reads a handful of display fields from them.

use crate::parse::{lenient_f64, lenient_string, lenient_u64};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A journal record, passed through unmodified from the catalog API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Journal(Value);

impl Journal {
    pub fn new(raw: Value) -> Self {
        Self(raw)
    }

    /// The raw JSON object as returned by the API.
    pub fn raw(&self) -> &Value {
        &self.0
    }

    /// Stable list key (`journal_id`), numeric or string on the wire.
    pub fn id(&self) -> Option<String> {
        match self.0.get("journal_id")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.str_field("title")
    }

    pub fn issn(&self) -> Option<&str> {
        self.str_field("issn")
    }

    pub fn eissn(&self) -> Option<&str> {
        self.str_field("eissn")
    }

    pub fn subject_area(&self) -> Option<&str> {
        self.str_field("subject_area_name")
    }

    pub fn category(&self) -> Option<&str> {
        self.str_field("category_letter")
    }

    pub fn country(&self) -> Option<&str> {
        self.str_field("country_name")
    }

    pub fn publisher(&self) -> Option<&str> {
        self.str_field("publisher_name")
    }

    /// Publishing year range label (`range_val`).
    pub fn year_range(&self) -> Option<&str> {
        self.str_field("range_val")
    }

    /// JPI score; the backend sends it either as a number or a numeric string.
    pub fn jpi(&self) -> Option<f64> {
        match self.0.get("jpi")? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    fn str_field(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }
}

/// One selectable value of a filter dimension.
///
/// Selected ids travel comma-joined in the search query, so an `id`
/// containing a comma cannot be selected (see [`crate::FilterState::toggle`]).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterOption {
    pub id: String,
    pub label: String,
}

impl FilterOption {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
        }
    }
}

/// One page of a filtered search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Journals on this page, in server order.
    pub items: Vec<Journal>,
    /// Total matches across all pages.
    pub total_count: u64,
    /// 1-based page this result belongs to.
    pub page: u32,
}

/// Field a filtered search can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Jpi,
    Year,
}

impl SortField {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Jpi => "jpi",
            Self::Year => "year",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "jpi" => Some(Self::Jpi),
            "year" => Some(Self::Year),
            _ => None,
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

/// Sort specification for filtered searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sort {
    pub field: SortField,
    pub order: SortOrder,
}

impl Sort {
    pub fn new(field: SortField, order: SortOrder) -> Self {
        Self { field, order }
    }

    pub fn jpi_desc() -> Self {
        Self::new(SortField::Jpi, SortOrder::Desc)
    }
}

impl std::fmt::Display for Sort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.field.as_api_str(), self.order.as_api_str())
    }
}

/// Allowed results-per-page values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PageSize {
    Ten,
    #[default]
    TwentyFive,
    Fifty,
    Hundred,
}

impl PageSize {
    pub const ALL: [PageSize; 4] = [Self::Ten, Self::TwentyFive, Self::Fifty, Self::Hundred];

    pub fn get(&self) -> u32 {
        match self {
            Self::Ten => 10,
            Self::TwentyFive => 25,
            Self::Fifty => 50,
            Self::Hundred => 100,
        }
    }

    pub fn from_u32(n: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|size| size.get() == n)
    }
}

impl std::fmt::Display for PageSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Field matched by the simple journal lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LookupKind {
    #[default]
    Title,
    Issn,
    Eissn,
}

impl LookupKind {
    pub fn as_api_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Issn => "issn",
            Self::Eissn => "eissn",
        }
    }

    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "title" => Some(Self::Title),
            "issn" => Some(Self::Issn),
            "eissn" | "e-issn" => Some(Self::Eissn),
            _ => None,
        }
    }
}

/// Output of the remote performance model. Every field may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prediction {
    #[serde(default, deserialize_with = "lenient_string")]
    pub predicted_year: Option<String>,
    #[serde(default, rename = "predictedJPI", deserialize_with = "lenient_f64")]
    pub predicted_jpi: Option<f64>,
    #[serde(default)]
    pub predicted_category: Option<String>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub confidence: Option<f64>,
    #[serde(default)]
    pub explanation: Option<String>,
}

impl Prediction {
    /// Confidence as a percentage with one decimal, e.g. `0.873` -> `"87.3%"`.
    pub fn confidence_percent(&self) -> Option<String> {
        self.confidence.map(|c| format!("{:.1}%", c * 100.0))
    }
}

/// Journal count per country (`/api/analysis/country`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CountryDistribution {
    #[serde(default)]
    pub country_name: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub journal_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_jpi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub category_x_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub category_y_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub category_w_count: Option<u64>,
}

impl CountryDistribution {
    /// Journals in category `letter` (W, X or Y, any case); `None` for other letters.
    pub fn category_count(&self, letter: &str) -> Option<u64> {
        match letter.trim().to_ascii_uppercase().as_str() {
            "W" => self.category_w_count,
            "X" => self.category_x_count,
            "Y" => self.category_y_count,
            _ => None,
        }
    }
}

/// Journal count per HEC category (`/api/analysis/category`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryDistribution {
    #[serde(default)]
    pub category_letter: String,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub journal_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub percentage: Option<f64>,
    #[serde(default, deserialize_with = "lenient_f64")]
    pub average_jpi: Option<f64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub countries_count: Option<u64>,
}

/// Category counts per publishing year (`/api/analysis/publishing-year`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YearDistribution {
    #[serde(default, deserialize_with = "lenient_string")]
    pub year: Option<String>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub category_x_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub category_y_count: Option<u64>,
    #[serde(default, deserialize_with = "lenient_u64")]
    pub category_w_count: Option<u64>,
}
