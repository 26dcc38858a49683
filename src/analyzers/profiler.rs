//! Column profiling across loosely-structured JSON records.
//!
//! The ColumnProfiler gathers per-field observations in two passes:
//!
//! **Pass 1: Field discovery**
//! - Collect every field name appearing in any object record, so that a key
//!   missing from one record counts as a null for that record
//!
//! **Pass 2: Per-column accumulation**
//! - Classify each non-null value and aggregate type counts
//! - Track distinct values, first-occurrence samples, and numeric aggregates
//!
//! Columns whose every value is null are dropped from the result; they carry
//! no information. Numeric aggregates are reported only for numeric columns,
//! never as zero placeholders.
//!
//! # Example
//!
//! ```rust
//! use datasense::analyzers::profiler::ColumnProfiler;
//! use serde_json::json;
//!
//! let records = vec![
//!     json!({"customer": "Acme", "revenue": 120.5}),
//!     json!({"customer": "Beta", "revenue": -40.0}),
//! ];
//!
//! let profiler = ColumnProfiler::new();
//! let columns = profiler.profile(&records);
//!
//! let revenue = &columns["revenue"];
//! assert_eq!(revenue.non_null_count, 2);
//! assert!(revenue.numeric_summary.as_ref().is_some_and(|s| s.has_negative));
//! ```

use std::collections::{BTreeMap, HashSet};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::analyzers::inference::{ColumnType, TypeCounts};
use crate::dataset;

/// Configuration for column profiling
#[derive(Debug, Clone)]
pub struct ProfilerConfig {
    /// Representative values retained per column (default: 3)
    pub sample_value_limit: usize,
}

impl Default for ProfilerConfig {
    fn default() -> Self {
        Self {
            sample_value_limit: 3,
        }
    }
}

/// Numeric aggregates over a column's non-null values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub has_negative: bool,
}

/// Complete profile of one observed column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnProfile {
    pub name: String,
    pub column_type: ColumnType,
    pub non_null_count: usize,
    pub null_count: usize,
    pub unique_count: usize,
    /// Up to `sample_value_limit` non-null values in first-occurrence order.
    pub sample_values: Vec<Value>,
    /// Present only for numeric columns.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub numeric_summary: Option<NumericSummary>,
}

impl ColumnProfile {
    /// Whether the column was classified numeric.
    pub fn is_numeric(&self) -> bool {
        self.column_type == ColumnType::Numeric
    }
}

/// Builder for ColumnProfiler
#[derive(Debug)]
pub struct ColumnProfilerBuilder {
    config: ProfilerConfig,
}

impl ColumnProfilerBuilder {
    /// Set the number of representative values retained per column
    pub fn sample_value_limit(mut self, limit: usize) -> Self {
        self.config.sample_value_limit = limit;
        self
    }

    /// Build the ColumnProfiler
    pub fn build(self) -> ColumnProfiler {
        ColumnProfiler {
            config: self.config,
        }
    }
}

/// Profiles the columns of a record collection.
#[derive(Debug)]
pub struct ColumnProfiler {
    config: ProfilerConfig,
}

impl ColumnProfiler {
    /// Create a new builder for ColumnProfiler
    pub fn builder() -> ColumnProfilerBuilder {
        ColumnProfilerBuilder {
            config: ProfilerConfig::default(),
        }
    }

    /// Create a ColumnProfiler with default configuration
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Profiles every field observed across `records`.
    ///
    /// Elements that are not objects contribute no fields; each such record
    /// counts as a null in every column. An empty input yields an empty map.
    pub fn profile(&self, records: &[Value]) -> BTreeMap<String, ColumnProfile> {
        let mut columns: BTreeMap<String, ColumnAccumulator> = BTreeMap::new();

        // Pass 1: discover fields so missing keys count as nulls below.
        for record in records {
            if let Some(fields) = dataset::fields(record) {
                for name in fields.keys() {
                    columns.entry(name.clone()).or_default();
                }
            }
        }

        // Pass 2: accumulate per-column observations in record order.
        for record in records {
            let fields = dataset::fields(record);
            for (name, acc) in columns.iter_mut() {
                let value = fields.and_then(|f| f.get(name)).unwrap_or(&Value::Null);
                acc.observe(value, self.config.sample_value_limit);
            }
        }

        let profiles: BTreeMap<String, ColumnProfile> = columns
            .into_iter()
            .filter_map(|(name, acc)| {
                acc.finish(name, records.len())
                    .map(|profile| (profile.name.clone(), profile))
            })
            .collect();

        debug!(
            records = records.len(),
            columns = profiles.len(),
            "Profiled columns"
        );

        profiles
    }
}

impl Default for ColumnProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-column state gathered during profiling.
#[derive(Debug, Default)]
struct ColumnAccumulator {
    counts: TypeCounts,
    uniques: HashSet<String>,
    samples: Vec<Value>,
    sum: f64,
    min: Option<f64>,
    max: Option<f64>,
    has_negative: bool,
}

impl ColumnAccumulator {
    fn observe(&mut self, value: &Value, sample_limit: usize) {
        if value.is_null() {
            return;
        }

        self.counts.observe(value);
        self.uniques.insert(canonical_key(value));
        if self.samples.len() < sample_limit {
            self.samples.push(value.clone());
        }

        if let Some(n) = value.as_f64() {
            self.sum += n;
            self.min = Some(self.min.map_or(n, |m| m.min(n)));
            self.max = Some(self.max.map_or(n, |m| m.max(n)));
            if n < 0.0 {
                self.has_negative = true;
            }
        }
    }

    fn finish(self, name: String, record_count: usize) -> Option<ColumnProfile> {
        let non_null_count = self.counts.non_null;
        if non_null_count == 0 {
            return None;
        }

        let column_type = self.counts.determine();
        let numeric_summary = match (column_type, self.min, self.max) {
            (ColumnType::Numeric, Some(min), Some(max)) => Some(NumericSummary {
                min,
                max,
                mean: self.sum / non_null_count as f64,
                has_negative: self.has_negative,
            }),
            _ => None,
        };

        Some(ColumnProfile {
            name,
            column_type,
            non_null_count,
            null_count: record_count - non_null_count,
            unique_count: self.uniques.len(),
            sample_values: self.samples,
            numeric_summary,
        })
    }
}

/// Distinct-value key: numbers compare by f64 value, so `1` and `1.0`
/// collapse; everything else compares by its JSON serialization.
fn canonical_key(value: &Value) -> String {
    match value.as_f64() {
        Some(n) => n.to_string(),
        None => value.to_string(),
    }
}
