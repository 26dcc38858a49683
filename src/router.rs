//! Rendering-time pattern routing.
//!
//! [`PatternRouter`] picks the visualization pipeline for a dataset. It is
//! deliberately separate from category detection in
//! [`SchemaAnalyzer`](crate::analyzers::SchemaAnalyzer):
//! routing also weighs record count, not just column names, and its
//! keyword families differ where rendering needs differ (a bridge
//! waterfall wants movement columns, not just the word "bridge").
//!
//! Rules are evaluated top to bottom and the first match wins. Bridge
//! vocabulary outranks customer/revenue co-occurrence, which outranks
//! geography, then quarter tokens, then the permissive monthly
//! heuristics. Monthly is last because its triggers would otherwise
//! shadow every more specific pattern.
//!
//! # Example
//!
//! ```rust
//! use datasense::analyzers::DataCategory;
//! use datasense::router::{PatternRouter, PatternTag};
//! use serde_json::json;
//!
//! let router = PatternRouter::new();
//! let data = json!([
//!     {"Starting ARR": 1200, "Churned ARR": -150, "Ending ARR": 1400}
//! ]);
//!
//! let tag = router.detect_pattern(&data, DataCategory::General);
//! assert_eq!(tag, PatternTag::RevenueBridge);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::analyzers::errors::AnalyzerError;
use crate::analyzers::schema::DataCategory;
use crate::dataset;

/// Visualization pipeline selected for a dataset.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternTag {
    /// Waterfall-style revenue movement rendering
    RevenueBridge,
    /// Customer concentration and ranking rendering
    CustomerAnalysis,
    /// Map and regional breakdown rendering
    Geographic,
    /// Quarter-over-quarter comparison rendering
    Quarterly,
    /// Month-over-month trend rendering
    MonthlyTrends,
    /// Generic table-first rendering
    #[default]
    Default,
}

impl PatternTag {
    /// Returns the lowercase tag used in serialized form.
    pub fn as_str(&self) -> &'static str {
        match self {
            PatternTag::RevenueBridge => "revenue_bridge",
            PatternTag::CustomerAnalysis => "customer_analysis",
            PatternTag::Geographic => "geographic",
            PatternTag::Quarterly => "quarterly",
            PatternTag::MonthlyTrends => "monthly_trends",
            PatternTag::Default => "default",
        }
    }
}

impl fmt::Display for PatternTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PatternTag {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "revenue_bridge" => Ok(PatternTag::RevenueBridge),
            "customer_analysis" => Ok(PatternTag::CustomerAnalysis),
            "geographic" => Ok(PatternTag::Geographic),
            "quarterly" => Ok(PatternTag::Quarterly),
            "monthly_trends" => Ok(PatternTag::MonthlyTrends),
            "default" => Ok(PatternTag::Default),
            other => Err(AnalyzerError::unknown_pattern(other)),
        }
    }
}

const BRIDGE_TERMS: &[&str] = &[
    "expansion",
    "contraction",
    "churn",
    "new",
    "bridge",
    "starting",
    "ending",
];
const CUSTOMER_TERMS: &[&str] = &["customer", "client", "company"];
const REVENUE_TERMS: &[&str] = &["revenue", "amount", "value"];
const GEO_TERMS: &[&str] = &["country", "region", "geographic", "location"];
const QUARTER_TERMS: &[&str] = &["q3", "q4", "quarter", "qoq"];
const MONTH_TERMS: &[&str] = &[
    "month", "monthly", "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct",
    "nov", "dec",
];
const TIME_TERMS: &[&str] = &["date", "time", "period"];
const VARIANCE_PAIR_TERMS: &[&str] = &["revenue", "amount"];

fn contains_any(joined: &str, terms: &[&str]) -> bool {
    terms.iter().any(|term| joined.contains(term))
}

/// Tuning knobs for pattern routing.
#[derive(Debug, Clone)]
pub struct RouterConfig {
    /// Record count at or below which a date plus revenue column pair is
    /// treated as a monthly series. The default assumes monthly
    /// granularity over at most two years; datasets with other short
    /// time series may want a different ceiling.
    pub monthly_row_ceiling: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            monthly_row_ceiling: 24,
        }
    }
}

/// Routes datasets to a visualization pipeline by column vocabulary and
/// record count.
#[derive(Debug, Clone, Default)]
pub struct PatternRouter {
    config: RouterConfig,
}

impl PatternRouter {
    /// Create a router with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a router with an explicit configuration.
    pub fn with_config(config: RouterConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Pick the rendering pipeline for a dataset.
    ///
    /// `declared` is the category a prior schema analysis assigned. It is
    /// a hint carried through for observability, not an input to the
    /// routing rules; the rules re-derive everything from the current
    /// column names so a stale schema cannot misroute fresh data.
    /// Non-array input has no columns to match and routes to
    /// [`PatternTag::Default`].
    #[instrument(skip(self, data))]
    pub fn detect_pattern(&self, data: &Value, declared: DataCategory) -> PatternTag {
        let records = dataset::records(data);
        let joined = dataset::joined_column_names(records);
        let tag = self.match_rules(&joined, records.len());

        debug!(
            declared = declared.as_str(),
            pattern = tag.as_str(),
            records = records.len(),
            "Routed dataset"
        );
        tag
    }

    /// Ordered routing rules, first match wins.
    fn match_rules(&self, joined: &str, record_count: usize) -> PatternTag {
        if contains_any(joined, BRIDGE_TERMS) {
            return PatternTag::RevenueBridge;
        }

        if contains_any(joined, CUSTOMER_TERMS) && contains_any(joined, REVENUE_TERMS) {
            return PatternTag::CustomerAnalysis;
        }

        if contains_any(joined, GEO_TERMS) {
            return PatternTag::Geographic;
        }

        if contains_any(joined, QUARTER_TERMS) {
            return PatternTag::Quarterly;
        }

        // Monthly triggers, broadest last. Month names and "month" itself
        // match directly; the remaining triggers catch series that label
        // their time axis differently.
        if contains_any(joined, MONTH_TERMS) {
            return PatternTag::MonthlyTrends;
        }
        if joined.contains("month_label") && contains_any(joined, REVENUE_TERMS) {
            return PatternTag::MonthlyTrends;
        }
        if joined.contains("variance") && contains_any(joined, VARIANCE_PAIR_TERMS) {
            return PatternTag::MonthlyTrends;
        }
        if contains_any(joined, TIME_TERMS)
            && contains_any(joined, REVENUE_TERMS)
            && record_count <= self.config.monthly_row_ceiling
        {
            return PatternTag::MonthlyTrends;
        }

        PatternTag::Default
    }
}
