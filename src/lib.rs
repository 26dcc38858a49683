//! # Datasense - JSON Dataset Analysis for Rust
//!
//! Datasense infers what a loosely-structured JSON business dataset *is*:
//! its business category, the type and statistics of every column, which
//! columns play which semantic role, and which chart types suit it. No
//! human-authored column mapping is required, and repeated analyses of
//! unchanged data are served from a TTL cache.
//!
//! ## Overview
//!
//! Dashboards and reporting tools routinely receive datasets they have
//! never seen before: customer revenue tables, country breakdowns,
//! monthly series, quarter-over-quarter comparisons. Datasense classifies
//! such a dataset from its column vocabulary alone, profiles every
//! column, groups columns into metric roles (revenue, date, percentage,
//! identifier, categorical), recommends chart types, and reports how
//! confident the whole inference is. A separate, lighter router picks the
//! rendering pipeline at display time.
//!
//! ## Quick Start
//!
//! ```rust
//! use datasense::prelude::*;
//! use serde_json::json;
//!
//! let analyzer = SchemaAnalyzer::new();
//! let data = json!([
//!     {"Customer Name": "Acme Corp", "Annual Revenue": 482000},
//!     {"Customer Name": "Beta Industries", "Annual Revenue": 390500}
//! ]);
//!
//! // First analysis runs the full pipeline; identical follow-ups are
//! // served from the cache.
//! let schema = analyzer.analyze(&data, "accounts.json");
//! assert_eq!(schema.data_type, DataCategory::Customer);
//! assert_eq!(schema.metrics.revenue_columns, vec!["Annual Revenue"]);
//! assert_eq!(schema.metrics.id_columns, vec!["Customer Name"]);
//! assert!(schema.confidence_score <= 100);
//!
//! // Pick a rendering pipeline for the same data.
//! let router = PatternRouter::new();
//! let tag = router.detect_pattern(&data, schema.data_type);
//! assert_eq!(tag, PatternTag::CustomerAnalysis);
//! ```
//!
//! ## Key Features
//!
//! ### Category Detection
//!
//! Column names are matched against ordered keyword families to classify
//! a dataset as quarterly, bridge, geographic, customer, monthly, or
//! general data. The ordering is a deliberate tie-break: specific
//! vocabularies outrank permissive ones.
//!
//! ### Column Profiling
//!
//! Every observed column gets null and unique counts, representative
//! sample values, and, for numeric columns, min/max/mean and a negative
//! value flag. Records may disagree on fields; missing fields count as
//! nulls and columns that are entirely null are dropped.
//!
//! ### Chart Suggestions and Confidence
//!
//! Metric roles and the detected category map to concrete chart kinds
//! (waterfall for bridge data, treemap and pareto for customer
//! concentration, and so on), and an additive 0-100 confidence score
//! summarizes how much structure the analysis actually found.
//!
//! ### Result Caching
//!
//! Analysis results are cached under a cheap content fingerprint with a
//! configurable TTL (default 300 seconds). Expired entries are evicted on
//! read. The cache is safe to share across threads and across analyzers.
//!
//! ## Architecture
//!
//! - **`analyzers`**: the inference pipeline (type inference, column
//!   profiling, metric classification, chart suggestions) and the
//!   orchestrating [`SchemaAnalyzer`](analyzers::SchemaAnalyzer)
//! - **`router`**: rendering-time pattern routing, separate from category
//!   detection because it also weighs record counts
//! - **`cache`**: generic TTL cache and content-derived cache keys
//! - **`dataset`**: structural helpers shared by the pipeline stages
//! - **`logging`**: `tracing` subscriber setup for applications that
//!   want datasense to configure logging

pub mod analyzers;
pub mod cache;
pub mod dataset;
pub mod logging;
pub mod prelude;
pub mod router;
