//! Schema analysis pipeline for loosely-structured JSON datasets.
//!
//! This module turns a parsed JSON dataset into a [`Schema`] describing
//! what the data is and how it could be visualized, without any
//! human-authored column mapping. The pipeline is a fixed sequence of
//! small, independently testable stages.
//!
//! ## Pipeline Stages
//!
//! - **Type Inference** (`inference`): per-value classification and
//!   whole-column type determination (numeric, datetime, categorical)
//! - **Column Profiler** (`profiler`): null/unique counts, sample values,
//!   and numeric aggregates for every observed column
//! - **Metric Classifier** (`metrics`): groups columns into semantic
//!   roles such as revenue, date, percentage, and identifier
//! - **Chart Suggestions** (`suggestions`): maps the detected category
//!   and metric groups to suitable chart kinds
//! - **Schema Analyzer** (`schema`): orchestrates the stages, detects the
//!   business category, scores confidence, and caches results
//!
//! ## Example Usage
//!
//! ```rust
//! use datasense::analyzers::{DataCategory, SchemaAnalyzer};
//! use serde_json::json;
//!
//! let analyzer = SchemaAnalyzer::new();
//! let data = json!([
//!     {"Country": "DE", "Revenue": 1200},
//!     {"Country": "FR", "Revenue": 980},
//!     {"Country": "US", "Revenue": 3400}
//! ]);
//!
//! let schema = analyzer.analyze(&data, "regions.json");
//! assert_eq!(schema.data_type, DataCategory::Geographic);
//! assert_eq!(schema.metrics.revenue_columns, vec!["Revenue"]);
//! assert!(!schema.suggested_visualizations.is_empty());
//! ```

pub mod errors;
pub mod inference;
pub mod metrics;
pub mod profiler;
pub mod schema;
pub mod suggestions;

pub use errors::{AnalyzerError, AnalyzerResult};
pub use inference::{classify_value, is_datetime_text, ColumnType, TypeCounts, ValueKind};
pub use metrics::{MetricClassifier, MetricGroups};
pub use profiler::{
    ColumnProfile, ColumnProfiler, ColumnProfilerBuilder, NumericSummary, ProfilerConfig,
};
pub use schema::{
    calculate_confidence, AnalyzerConfig, DataCategory, Schema, SchemaAnalyzer,
    SchemaAnalyzerBuilder,
};
pub use suggestions::{suggest_charts, ChartKind};
