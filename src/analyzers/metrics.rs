//! Metric-role classification of profiled columns.
//!
//! Groups columns into semantic roles by name: revenue, date, percentage,
//! identifier, or categorical-by-elimination. Classification is an ordered
//! first-match over keyword lists, so the precedence is data, not scattered
//! conditionals, and a column lands in at most one group.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::analyzers::profiler::ColumnProfile;

/// Keyword lists for metric-role classification.
#[derive(Debug, Clone)]
struct RolePatterns {
    /// Terms that indicate monetary columns
    revenue_terms: Vec<String>,
    /// Terms that indicate temporal columns
    date_terms: Vec<String>,
    /// Terms that indicate percentage/ratio columns
    percentage_terms: Vec<String>,
    /// Terms that indicate identifier columns
    id_terms: Vec<String>,
}

impl Default for RolePatterns {
    fn default() -> Self {
        Self {
            revenue_terms: vec![
                "revenue".to_string(),
                "amount".to_string(),
                "value".to_string(),
                "price".to_string(),
                "cost".to_string(),
            ],
            date_terms: vec![
                "date".to_string(),
                "month".to_string(),
                "quarter".to_string(),
                "year".to_string(),
                "time".to_string(),
            ],
            percentage_terms: vec![
                "percent".to_string(),
                "%".to_string(),
                "rate".to_string(),
                "ratio".to_string(),
            ],
            id_terms: vec![
                "id".to_string(),
                "name".to_string(),
                "customer".to_string(),
                "client".to_string(),
            ],
        }
    }
}

/// Column names grouped by semantic role.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricGroups {
    pub revenue_columns: Vec<String>,
    pub date_columns: Vec<String>,
    pub percentage_columns: Vec<String>,
    pub id_columns: Vec<String>,
    pub categorical_columns: Vec<String>,
}

impl MetricGroups {
    /// Total number of group memberships across all roles.
    pub fn total_memberships(&self) -> usize {
        self.revenue_columns.len()
            + self.date_columns.len()
            + self.percentage_columns.len()
            + self.id_columns.len()
            + self.categorical_columns.len()
    }

    /// Whether no column joined any group.
    pub fn is_empty(&self) -> bool {
        self.total_memberships() == 0
    }
}

/// Classifies profiled columns into metric groups.
#[derive(Debug, Clone)]
pub struct MetricClassifier {
    patterns: RolePatterns,
    /// A non-numeric column joins `categorical_columns` only when its
    /// distinct-value count stays below this fraction of the record count.
    categorical_unique_ratio: f64,
}

impl MetricClassifier {
    /// Classifier with the default 0.5 categorical uniqueness ratio.
    pub fn new() -> Self {
        Self::with_ratio(0.5)
    }

    /// Classifier with a custom categorical uniqueness ratio.
    pub fn with_ratio(categorical_unique_ratio: f64) -> Self {
        Self {
            patterns: RolePatterns::default(),
            categorical_unique_ratio,
        }
    }

    /// Assigns each column to the first matching role.
    ///
    /// Evaluation order: revenue, date, percentage, id, then categorical by
    /// elimination. Matching is a case-insensitive substring test on the
    /// column name. A revenue-named column that is not numeric is consumed
    /// by the revenue rule without joining any group; the later rules never
    /// see it.
    pub fn classify(
        &self,
        columns: &BTreeMap<String, ColumnProfile>,
        record_count: usize,
    ) -> MetricGroups {
        let mut groups = MetricGroups::default();

        for (name, profile) in columns {
            let lower = name.to_lowercase();

            if matches_any(&lower, &self.patterns.revenue_terms) {
                if profile.is_numeric() {
                    groups.revenue_columns.push(name.clone());
                }
            } else if matches_any(&lower, &self.patterns.date_terms) {
                groups.date_columns.push(name.clone());
            } else if matches_any(&lower, &self.patterns.percentage_terms) {
                groups.percentage_columns.push(name.clone());
            } else if matches_any(&lower, &self.patterns.id_terms) {
                groups.id_columns.push(name.clone());
            } else if !profile.is_numeric()
                && (profile.unique_count as f64)
                    < record_count as f64 * self.categorical_unique_ratio
            {
                groups.categorical_columns.push(name.clone());
            }
        }

        groups
    }
}

impl Default for MetricClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn matches_any(name: &str, terms: &[String]) -> bool {
    terms.iter().any(|term| name.contains(term.as_str()))
}
