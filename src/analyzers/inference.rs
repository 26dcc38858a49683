//! Type inference for dynamically-typed JSON columns.
//!
//! Classifies individual scalar values and aggregates those observations
//! into a per-column type. The column rules are deliberately conservative:
//! a column is numeric only when every non-null value is a JSON number, and
//! datetime only when every non-null value is a string that parses as a
//! date or timestamp. Anything mixed resolves to categorical rather than
//! over-claiming numeric or temporal semantics.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Per-column type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Every non-null value is a JSON number.
    Numeric,
    /// Every non-null value is a string parseable as a date or timestamp.
    Datetime,
    /// Mixed or textual values, including numeric-looking strings.
    Categorical,
    /// No type claim: only nested objects/arrays were observed.
    Unknown,
}

impl ColumnType {
    /// The type name as a string tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Numeric => "numeric",
            ColumnType::Datetime => "datetime",
            ColumnType::Categorical => "categorical",
            ColumnType::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classification of a single non-null scalar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Numeric,
    Datetime,
    Boolean,
    Text,
    /// Nested object or array.
    Nested,
}

/// Pattern matching utilities for datetime detection.
struct TypePatterns {
    date_iso: Regex,
    date_slash: Regex,
    date_us: Regex,
    date_eu: Regex,
    datetime_iso: Regex,
}

impl TypePatterns {
    fn new() -> Self {
        Self {
            date_iso: Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap(),
            date_slash: Regex::new(r"^\d{4}/\d{1,2}/\d{1,2}$").unwrap(),
            date_us: Regex::new(r"^\d{1,2}/\d{1,2}/\d{4}$").unwrap(),
            date_eu: Regex::new(r"^\d{1,2}\.\d{1,2}\.\d{4}$").unwrap(),
            datetime_iso: Regex::new(r"^\d{4}-\d{2}-\d{2}[T ]\d{2}:\d{2}:\d{2}").unwrap(),
        }
    }
}

static PATTERNS: Lazy<TypePatterns> = Lazy::new(TypePatterns::new);

/// Whether a string holds a date or timestamp in an accepted format.
///
/// The regexes are cheap shape pre-checks; chrono does the actual
/// validation, so `2023-13-45` matches the ISO shape but is rejected.
pub fn is_datetime_text(value: &str) -> bool {
    let trimmed = value.trim();

    if PATTERNS.datetime_iso.is_match(trimmed) {
        DateTime::parse_from_rfc3339(trimmed).is_ok()
            || NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
            || NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S%.f").is_ok()
    } else if PATTERNS.date_iso.is_match(trimmed) {
        NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").is_ok()
    } else if PATTERNS.date_slash.is_match(trimmed) {
        NaiveDate::parse_from_str(trimmed, "%Y/%m/%d").is_ok()
    } else if PATTERNS.date_us.is_match(trimmed) {
        NaiveDate::parse_from_str(trimmed, "%m/%d/%Y").is_ok()
    } else if PATTERNS.date_eu.is_match(trimmed) {
        NaiveDate::parse_from_str(trimmed, "%d.%m.%Y").is_ok()
    } else {
        false
    }
}

/// Classifies one scalar value; `None` for JSON null.
pub fn classify_value(value: &Value) -> Option<ValueKind> {
    match value {
        Value::Null => None,
        Value::Number(_) => Some(ValueKind::Numeric),
        Value::Bool(_) => Some(ValueKind::Boolean),
        Value::String(s) => {
            if is_datetime_text(s) {
                Some(ValueKind::Datetime)
            } else {
                Some(ValueKind::Text)
            }
        }
        Value::Array(_) | Value::Object(_) => Some(ValueKind::Nested),
    }
}

/// Observation counts gathered over a column's non-null values.
#[derive(Debug, Default)]
pub struct TypeCounts {
    pub non_null: usize,
    pub numeric: usize,
    pub datetime: usize,
    pub boolean: usize,
    pub text: usize,
    pub nested: usize,
}

impl TypeCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one value; nulls are not counted.
    pub fn observe(&mut self, value: &Value) {
        let Some(kind) = classify_value(value) else {
            return;
        };
        self.non_null += 1;
        match kind {
            ValueKind::Numeric => self.numeric += 1,
            ValueKind::Datetime => self.datetime += 1,
            ValueKind::Boolean => self.boolean += 1,
            ValueKind::Text => self.text += 1,
            ValueKind::Nested => self.nested += 1,
        }
    }

    /// Determines the column type from the gathered counts.
    pub fn determine(&self) -> ColumnType {
        if self.non_null == 0 {
            ColumnType::Unknown
        } else if self.numeric == self.non_null {
            ColumnType::Numeric
        } else if self.datetime == self.non_null {
            ColumnType::Datetime
        } else if self.nested == self.non_null {
            ColumnType::Unknown
        } else {
            ColumnType::Categorical
        }
    }
}
