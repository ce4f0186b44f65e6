//! Catalog API response parsing.
//!
//! The backend is loose about JSON types (numeric ids as strings, counts as
//! strings, per-table id field names), so everything is normalized here and
//! the rest of the crate only sees the typed shapes from [`crate::types`].

use crate::error::{HjrsError, Result};
use crate::types::{FilterOption, Journal, Prediction, SearchResult};
use serde::de::{self, DeserializeOwned, Visitor};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::HashSet;
use std::fmt;

/// Message shown when a search succeeds but matches nothing.
pub const NO_RESULTS_MESSAGE: &str = "No journals found matching your search criteria";

/// A JSON scalar that may arrive as a number or a string.
enum Scalar {
    Str(String),
    Int(i64),
    UInt(u64),
    Float(f64),
}

struct ScalarVisitor;

impl<'de> Visitor<'de> for ScalarVisitor {
    type Value = Option<Scalar>;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a string, number, or null")
    }

    fn visit_none<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_unit<E: de::Error>(self) -> std::result::Result<Self::Value, E> {
        Ok(None)
    }

    fn visit_some<D>(self, deserializer: D) -> std::result::Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Ok(Some(Scalar::Str(v.to_string())))
    }

    fn visit_string<E: de::Error>(self, v: String) -> std::result::Result<Self::Value, E> {
        Ok(Some(Scalar::Str(v)))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(Some(Scalar::Int(v)))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        Ok(Some(Scalar::UInt(v)))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        Ok(Some(Scalar::Float(v)))
    }
}

fn scalar<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<Scalar>, D::Error> {
    deserializer.deserialize_option(ScalarVisitor)
}

/// Deserialize an optional count given as an integer or a numeric string.
pub(crate) fn lenient_u64<'de, D>(deserializer: D) -> std::result::Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match scalar(deserializer)? {
        Some(Scalar::UInt(v)) => Some(v),
        Some(Scalar::Int(v)) => u64::try_from(v).ok(),
        Some(Scalar::Float(v)) if v >= 0.0 && v.fract() == 0.0 => Some(v as u64),
        Some(Scalar::Str(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Deserialize an optional float given as a number or a numeric string.
pub(crate) fn lenient_f64<'de, D>(deserializer: D) -> std::result::Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match scalar(deserializer)? {
        Some(Scalar::UInt(v)) => Some(v as f64),
        Some(Scalar::Int(v)) => Some(v as f64),
        Some(Scalar::Float(v)) => Some(v),
        Some(Scalar::Str(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// Deserialize an optional string that may arrive as a number.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match scalar(deserializer)? {
        Some(Scalar::Str(s)) => Some(s),
        Some(Scalar::UInt(v)) => Some(v.to_string()),
        Some(Scalar::Int(v)) => Some(v.to_string()),
        Some(Scalar::Float(v)) => Some(v.to_string()),
        None => None,
    })
}

fn value_to_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a reference list (`/api/reference/*`) into uniform options.
///
/// Each table names its columns differently (`country_id`/`country_name`,
/// `year_id`/`range_val`, ...), so the caller supplies the field pair.
/// Rows without an id are skipped; a repeated id keeps its first label.
pub fn parse_options(json: &str, id_field: &str, label_field: &str) -> Result<Vec<FilterOption>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| HjrsError::Parse(format!("Invalid reference JSON: {}", e)))?;
    let rows = value
        .as_array()
        .ok_or_else(|| HjrsError::Parse("Reference list is not an array".to_string()))?;

    let mut seen = HashSet::new();
    let mut options = Vec::with_capacity(rows.len());
    for row in rows {
        let Some(id) = row.get(id_field).and_then(value_to_id) else {
            continue;
        };
        if !seen.insert(id.clone()) {
            continue;
        }
        let label = row
            .get(label_field)
            .and_then(value_to_id)
            .unwrap_or_else(|| id.clone());
        options.push(FilterOption { id, label });
    }
    Ok(options)
}

/// Parse a filtered-search payload.
///
/// Accepts a bare array (total = array length) or `{results, total}`.
pub fn parse_search_payload(json: &str, page: u32) -> Result<SearchResult> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| HjrsError::Parse(format!("Invalid search JSON: {}", e)))?;

    let (items, total) = match value {
        Value::Array(rows) => (rows, None),
        Value::Object(mut map) => {
            let rows = match map.remove("results") {
                Some(Value::Array(rows)) => rows,
                _ => {
                    return Err(HjrsError::Parse(
                        "Search response has no results array".to_string(),
                    ))
                }
            };
            let total = map
                .remove("total")
                .and_then(|t| lenient_u64(t).ok().flatten());
            (rows, total)
        }
        _ => {
            return Err(HjrsError::Parse(
                "Search response is neither an array nor an object".to_string(),
            ))
        }
    };

    let total_count = total.unwrap_or(items.len() as u64);
    Ok(SearchResult {
        items: items.into_iter().map(Journal::new).collect(),
        total_count,
        page,
    })
}

/// Parse a bare array of journals (simple lookup).
pub fn parse_journal_list(json: &str) -> Result<Vec<Journal>> {
    let rows: Vec<Value> = serde_json::from_str(json)
        .map_err(|e| HjrsError::Parse(format!("Invalid journal list: {}", e)))?;
    Ok(rows.into_iter().map(Journal::new).collect())
}

#[derive(Debug, Deserialize)]
struct PredictionEnvelope {
    prediction: Option<Prediction>,
}

/// Parse the `{prediction: {...}}` envelope returned by the model endpoint.
pub fn parse_prediction(json: &str) -> Result<Prediction> {
    let envelope: PredictionEnvelope = serde_json::from_str(json)
        .map_err(|e| HjrsError::Parse(format!("Invalid prediction response: {}", e)))?;
    envelope
        .prediction
        .ok_or_else(|| HjrsError::Parse("Prediction response has no prediction".to_string()))
}

/// Parse a list of rows, treating any non-array payload as empty.
pub fn parse_rows<T: DeserializeOwned>(json: &str) -> Result<Vec<T>> {
    let value: Value = serde_json::from_str(json)
        .map_err(|e| HjrsError::Parse(format!("Invalid analysis JSON: {}", e)))?;
    match value {
        Value::Array(_) => serde_json::from_value(value)
            .map_err(|e| HjrsError::Parse(format!("Invalid analysis row: {}", e))),
        _ => Ok(Vec::new()),
    }
}
