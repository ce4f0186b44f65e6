//! Advanced-search filter state.
//!
//! Six multi-select dimensions hold ordered sets of option ids; the JPI
//! range is two optional bounds in `[0, 100]` with `min <= max` whenever
//! both are set.

use serde::{Deserialize, Serialize};

/// Lowest accepted JPI bound.
pub const JPI_MIN: f64 = 0.0;
/// Highest accepted JPI bound.
pub const JPI_MAX: f64 = 100.0;

/// A multi-select filter dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FilterDimension {
    Country,
    Year,
    Category,
    SubjectArea,
    SubjectSubcategory,
    Publisher,
}

impl FilterDimension {
    pub const ALL: [FilterDimension; 6] = [
        Self::Country,
        Self::Year,
        Self::Category,
        Self::SubjectArea,
        Self::SubjectSubcategory,
        Self::Publisher,
    ];

    /// Query parameter name used by `filtered-search`.
    pub fn query_key(&self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Year => "year",
            Self::Category => "category",
            Self::SubjectArea => "subjectArea",
            Self::SubjectSubcategory => "subjectSubcategories",
            Self::Publisher => "publisher",
        }
    }

    pub fn from_query_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.query_key() == key)
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Country => "Country",
            Self::Year => "Publishing Year",
            Self::Category => "Category",
            Self::SubjectArea => "Subject Area",
            Self::SubjectSubcategory => "Subject Subcategory",
            Self::Publisher => "Publisher",
        }
    }

    /// Parse a CLI-style name (`country`, `subject-area`, ...).
    pub fn from_str_loose(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['_', ' '], "-").as_str() {
            "country" | "countries" => Some(Self::Country),
            "year" | "years" | "publishing-year" | "publishing-years" => Some(Self::Year),
            "category" | "categories" => Some(Self::Category),
            "subject-area" | "subject-areas" | "subjectarea" => Some(Self::SubjectArea),
            "subcategory" | "subcategories" | "subject-subcategory" | "subject-subcategories" => {
                Some(Self::SubjectSubcategory)
            }
            "publisher" | "publishers" => Some(Self::Publisher),
            _ => None,
        }
    }
}

/// One end of the JPI range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScalarBound {
    MinJpi,
    MaxJpi,
}

impl ScalarBound {
    pub fn query_key(&self) -> &'static str {
        match self {
            Self::MinJpi => "minJpi",
            Self::MaxJpi => "maxJpi",
        }
    }
}

/// Current filter selections for the advanced search.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    country: Vec<String>,
    year: Vec<String>,
    category: Vec<String>,
    subject_area: Vec<String>,
    subject_subcategory: Vec<String>,
    publisher: Vec<String>,
    min_jpi: Option<f64>,
    max_jpi: Option<f64>,
}

impl FilterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selected ids for a dimension, in selection order.
    pub fn selected(&self, dimension: FilterDimension) -> &[String] {
        match dimension {
            FilterDimension::Country => &self.country,
            FilterDimension::Year => &self.year,
            FilterDimension::Category => &self.category,
            FilterDimension::SubjectArea => &self.subject_area,
            FilterDimension::SubjectSubcategory => &self.subject_subcategory,
            FilterDimension::Publisher => &self.publisher,
        }
    }

    fn selected_mut(&mut self, dimension: FilterDimension) -> &mut Vec<String> {
        match dimension {
            FilterDimension::Country => &mut self.country,
            FilterDimension::Year => &mut self.year,
            FilterDimension::Category => &mut self.category,
            FilterDimension::SubjectArea => &mut self.subject_area,
            FilterDimension::SubjectSubcategory => &mut self.subject_subcategory,
            FilterDimension::Publisher => &mut self.publisher,
        }
    }

    pub fn is_selected(&self, dimension: FilterDimension, option_id: &str) -> bool {
        self.selected(dimension).iter().any(|id| id == option_id)
    }

    /// Remove `option_id` if selected, otherwise append it.
    ///
    /// Ids are comma-joined on the wire, so an empty id or one containing a
    /// comma is ignored. Returns whether the selection changed.
    pub fn toggle(&mut self, dimension: FilterDimension, option_id: impl Into<String>) -> bool {
        let option_id = option_id.into();
        if option_id.is_empty() || option_id.contains(',') {
            tracing::warn!(?dimension, %option_id, "filter id not representable in a query, ignored");
            return false;
        }
        let values = self.selected_mut(dimension);
        if let Some(pos) = values.iter().position(|id| *id == option_id) {
            values.remove(pos);
        } else {
            values.push(option_id);
        }
        true
    }

    pub fn scalar(&self, bound: ScalarBound) -> Option<f64> {
        match bound {
            ScalarBound::MinJpi => self.min_jpi,
            ScalarBound::MaxJpi => self.max_jpi,
        }
    }

    /// Set or clear a JPI bound.
    ///
    /// Out-of-range values, non-finite values, and values that would put
    /// `min` above `max` are ignored and the previous value is kept.
    /// Returns whether the state changed.
    pub fn set_scalar(&mut self, bound: ScalarBound, value: Option<f64>) -> bool {
        if let Some(v) = value {
            if !v.is_finite() || !(JPI_MIN..=JPI_MAX).contains(&v) {
                return false;
            }
            let violates = match bound {
                ScalarBound::MinJpi => self.max_jpi.is_some_and(|max| v > max),
                ScalarBound::MaxJpi => self.min_jpi.is_some_and(|min| v < min),
            };
            if violates {
                return false;
            }
        }

        let slot = match bound {
            ScalarBound::MinJpi => &mut self.min_jpi,
            ScalarBound::MaxJpi => &mut self.max_jpi,
        };
        let changed = *slot != value;
        *slot = value;
        changed
    }

    /// Reset every dimension to empty.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Number of dimensions (multi-select or bound) with a value.
    pub fn active_count(&self) -> usize {
        let multi = FilterDimension::ALL
            .iter()
            .filter(|d| !self.selected(**d).is_empty())
            .count();
        multi + usize::from(self.min_jpi.is_some()) + usize::from(self.max_jpi.is_some())
    }

    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }
}
