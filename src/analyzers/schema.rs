//! Dataset schema analysis with category detection and result caching.
//!
//! [`SchemaAnalyzer`] is the main entry point of the crate. Given a parsed
//! JSON dataset it produces a [`Schema`]: the detected business category,
//! the structural shape, per-column profiles, semantic metric groups,
//! chart suggestions, and a confidence score summarizing how much the
//! analysis actually learned.
//!
//! Results are cached under a content-derived key, so re-analyzing an
//! unchanged dataset is a lookup rather than a recomputation. Inputs that
//! carry no records at all short-circuit to a minimal schema and never
//! touch the cache.
//!
//! # Example
//!
//! ```rust
//! use datasense::analyzers::SchemaAnalyzer;
//! use serde_json::json;
//!
//! let analyzer = SchemaAnalyzer::new();
//! let data = json!([
//!     {"Customer Name": "Acme Corp", "Quarter 3 Revenue": 125000, "Quarter 4 Revenue": 138500},
//!     {"Customer Name": "Beta Industries", "Quarter 3 Revenue": 98200, "Quarter 4 Revenue": 91400}
//! ]);
//!
//! let schema = analyzer.analyze(&data, "clients.json");
//! assert_eq!(schema.data_type.as_str(), "quarterly");
//! assert_eq!(schema.structure.record_count, 2);
//! assert!(schema.confidence_score > 0);
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, instrument};

use crate::analyzers::errors::{AnalyzerError, AnalyzerResult};
use crate::analyzers::metrics::{MetricClassifier, MetricGroups};
use crate::analyzers::profiler::{ColumnProfile, ColumnProfiler};
use crate::analyzers::suggestions::{suggest_charts, ChartKind};
use crate::cache::{derive_key, TtlCache};
use crate::dataset::{self, DatasetStructure};

/// Business category detected from a dataset's column names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCategory {
    /// Quarter-over-quarter reporting data
    Quarterly,
    /// Revenue bridge movements (churn, expansion)
    Bridge,
    /// Country or region breakdowns
    Geographic,
    /// Customer or client level data
    Customer,
    /// Month-over-month reporting data
    Monthly,
    /// Tabular data with no recognized category
    General,
    /// Input was not a record collection
    Unknown,
}

impl DataCategory {
    /// Returns the lowercase tag used in serialized schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            DataCategory::Quarterly => "quarterly",
            DataCategory::Bridge => "bridge",
            DataCategory::Geographic => "geographic",
            DataCategory::Customer => "customer",
            DataCategory::Monthly => "monthly",
            DataCategory::General => "general",
            DataCategory::Unknown => "unknown",
        }
    }
}

impl fmt::Display for DataCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DataCategory {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "quarterly" => Ok(DataCategory::Quarterly),
            "bridge" => Ok(DataCategory::Bridge),
            "geographic" => Ok(DataCategory::Geographic),
            "customer" => Ok(DataCategory::Customer),
            "monthly" => Ok(DataCategory::Monthly),
            "general" => Ok(DataCategory::General),
            "unknown" => Ok(DataCategory::Unknown),
            other => Err(AnalyzerError::unknown_category(other)),
        }
    }
}

/// Ordered detection rules. The first category whose terms appear in the
/// joined column names wins, so the more specific categories are listed
/// before the broader ones ("quarter" outranks "month", bridge terms
/// outrank the customer terms they often travel with).
const CATEGORY_RULES: &[(DataCategory, &[&str])] = &[
    (DataCategory::Quarterly, &["quarter", "q3", "q4", "qoq"]),
    (DataCategory::Bridge, &["churn", "expansion", "bridge"]),
    (DataCategory::Geographic, &["country", "region", "geographic"]),
    (DataCategory::Customer, &["customer", "client", "concentration"]),
    (DataCategory::Monthly, &["month", "monthly", "mom"]),
];

/// Tuning knobs for schema analysis.
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Leading records inspected for category detection
    pub detect_sample_size: usize,
    /// Representative values retained per column profile
    pub sample_value_limit: usize,
    /// Uniqueness fraction below which a non-numeric column counts as categorical
    pub categorical_unique_ratio: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            detect_sample_size: 5,
            sample_value_limit: 3,
            categorical_unique_ratio: 0.5,
        }
    }
}

/// Complete analysis result for one dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    /// Detected business category
    pub data_type: DataCategory,
    /// Structural shape of the input
    pub structure: DatasetStructure,
    /// Per-column profiles, keyed by column name
    pub columns: BTreeMap<String, ColumnProfile>,
    /// Column names grouped by semantic role
    pub metrics: MetricGroups,
    /// Chart kinds suited to the detected category and metrics
    pub suggested_visualizations: Vec<ChartKind>,
    /// How much the analysis learned, 0 to 100
    pub confidence_score: u8,
}

impl Schema {
    /// Serializes the schema as a JSON string.
    pub fn to_json(&self) -> AnalyzerResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Parses a schema from its JSON form.
    pub fn from_json(json: &str) -> AnalyzerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Confidence that the analysis captured something meaningful.
///
/// Additive scoring: 30 points for a recognized category, 2 per profiled
/// column up to 20, 5 per metric group membership up to 30, and 20 for a
/// non-empty suggestion list, clamped to 100.
pub fn calculate_confidence(
    category: DataCategory,
    columns: &BTreeMap<String, ColumnProfile>,
    metrics: &MetricGroups,
    suggestions: &[ChartKind],
) -> u8 {
    let mut score = 0usize;

    if category != DataCategory::Unknown {
        score += 30;
    }
    score += columns.len().saturating_mul(2).min(20);
    score += metrics.total_memberships().saturating_mul(5).min(30);
    if !suggestions.is_empty() {
        score += 20;
    }

    score.min(100) as u8
}

/// Builder for [`SchemaAnalyzer`].
#[derive(Debug, Default)]
pub struct SchemaAnalyzerBuilder {
    config: AnalyzerConfig,
    cache: Option<Arc<TtlCache<Schema>>>,
}

impl SchemaAnalyzerBuilder {
    /// Replaces the whole configuration.
    pub fn config(mut self, config: AnalyzerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets how many leading records category detection inspects.
    pub fn detect_sample_size(mut self, count: usize) -> Self {
        self.config.detect_sample_size = count;
        self
    }

    /// Sets how many representative values each column profile retains.
    pub fn sample_value_limit(mut self, limit: usize) -> Self {
        self.config.sample_value_limit = limit;
        self
    }

    /// Sets the uniqueness fraction bounding categorical classification.
    pub fn categorical_unique_ratio(mut self, ratio: f64) -> Self {
        self.config.categorical_unique_ratio = ratio;
        self
    }

    /// Shares an existing cache instead of creating a private one.
    pub fn cache(mut self, cache: Arc<TtlCache<Schema>>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> SchemaAnalyzer {
        let config = self.config;
        SchemaAnalyzer {
            profiler: ColumnProfiler::builder()
                .sample_value_limit(config.sample_value_limit)
                .build(),
            classifier: MetricClassifier::with_ratio(config.categorical_unique_ratio),
            cache: self.cache.unwrap_or_else(|| Arc::new(TtlCache::new())),
            runs: AtomicU64::new(0),
            config,
        }
    }
}

/// Analyzes JSON datasets into [`Schema`] descriptions.
#[derive(Debug)]
pub struct SchemaAnalyzer {
    config: AnalyzerConfig,
    cache: Arc<TtlCache<Schema>>,
    profiler: ColumnProfiler,
    classifier: MetricClassifier,
    runs: AtomicU64,
}

impl SchemaAnalyzer {
    /// Create a builder for customizing the analyzer.
    pub fn builder() -> SchemaAnalyzerBuilder {
        SchemaAnalyzerBuilder::default()
    }

    /// Create an analyzer with default configuration and a private cache.
    pub fn new() -> Self {
        Self::builder().build()
    }

    /// Analyze a dataset, reusing a cached schema when one is fresh.
    ///
    /// The `discriminator` separates cache entries for datasets that would
    /// otherwise fingerprint identically, such as two files sharing their
    /// first record. Inputs with nothing to analyze (null, `[]`, `{}`, or
    /// the empty string) return a minimal schema without caching it.
    ///
    /// ```rust
    /// use datasense::analyzers::SchemaAnalyzer;
    /// use serde_json::json;
    ///
    /// let analyzer = SchemaAnalyzer::new();
    ///
    /// let schema = analyzer.analyze(&json!([]), "empty");
    /// assert_eq!(schema.confidence_score, 0);
    /// assert!(schema.columns.is_empty());
    /// ```
    #[instrument(skip(self, data))]
    pub fn analyze(&self, data: &Value, discriminator: &str) -> Schema {
        if dataset::is_empty_input(data) {
            debug!("Input carries no records, returning minimal schema");
            return self.minimal_schema(data);
        }

        let key = derive_key(data, &[discriminator]);
        if let Some(schema) = self.cache.get(&key) {
            debug!(%key, "Schema cache hit");
            return schema;
        }

        let schema = self.run_analysis(data);
        info!(
            %key,
            category = schema.data_type.as_str(),
            columns = schema.columns.len(),
            confidence = schema.confidence_score,
            "Analyzed dataset schema"
        );
        self.cache.set(key, schema.clone());
        schema
    }

    /// Detect the business category from column names.
    ///
    /// Only the first few records are inspected; column naming is assumed
    /// to be homogeneous across a dataset. Non-array input and empty
    /// arrays have no columns to inspect and map to
    /// [`DataCategory::Unknown`].
    pub fn detect_category(&self, data: &Value) -> DataCategory {
        let records = dataset::records(data);
        if records.is_empty() {
            return DataCategory::Unknown;
        }

        let sample = &records[..records.len().min(self.config.detect_sample_size)];
        let joined = dataset::joined_column_names(sample);
        for (category, terms) in CATEGORY_RULES {
            if terms.iter().any(|term| joined.contains(term)) {
                return *category;
            }
        }

        DataCategory::General
    }

    /// Number of full analysis executions performed, excluding cache hits
    /// and empty-input short circuits.
    pub fn analysis_runs(&self) -> u64 {
        self.runs.load(Ordering::Relaxed)
    }

    /// The schema cache backing this analyzer.
    pub fn cache(&self) -> &Arc<TtlCache<Schema>> {
        &self.cache
    }

    /// The active configuration.
    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    fn run_analysis(&self, data: &Value) -> Schema {
        self.runs.fetch_add(1, Ordering::Relaxed);

        let records = dataset::records(data);
        let data_type = self.detect_category(data);
        let structure = dataset::analyze_structure(data);
        let columns = self.profiler.profile(records);
        let metrics = self.classifier.classify(&columns, records.len());
        let suggested_visualizations = suggest_charts(data_type, &metrics);
        let confidence_score =
            calculate_confidence(data_type, &columns, &metrics, &suggested_visualizations);

        Schema {
            data_type,
            structure,
            columns,
            metrics,
            suggested_visualizations,
            confidence_score,
        }
    }

    fn minimal_schema(&self, data: &Value) -> Schema {
        Schema {
            data_type: DataCategory::Unknown,
            structure: dataset::analyze_structure(data),
            columns: BTreeMap::new(),
            metrics: MetricGroups::default(),
            suggested_visualizations: Vec::new(),
            confidence_score: 0,
        }
    }
}

impl Default for SchemaAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzers::inference::ColumnType;
    use crate::dataset::StructureKind;
    use serde_json::json;

    fn quarterly_rows() -> Value {
        json!([
            {"Customer Name": "Acme Corp", "Quarter 3 Revenue": 125000, "Quarter 4 Revenue": 138500},
            {"Customer Name": "Beta Industries", "Quarter 3 Revenue": 98200, "Quarter 4 Revenue": 91400},
            {"Customer Name": "Gamma LLC", "Quarter 3 Revenue": 157300, "Quarter 4 Revenue": 164800}
        ])
    }

    #[test]
    fn test_detect_category_for_each_keyword_family() {
        let analyzer = SchemaAnalyzer::new();

        let cases = [
            (json!([{"Quarter": "Q3", "Total": 1}]), DataCategory::Quarterly),
            (json!([{"Churn Amount": -5, "Total": 1}]), DataCategory::Bridge),
            (json!([{"Country": "DE", "Total": 1}]), DataCategory::Geographic),
            (json!([{"Client": "Acme", "Total": 1}]), DataCategory::Customer),
            (json!([{"Month": "Jan", "Total": 1}]), DataCategory::Monthly),
            (json!([{"Alpha": 1, "Beta": 2}]), DataCategory::General),
        ];
        for (data, expected) in cases {
            assert_eq!(analyzer.detect_category(&data), expected, "data: {data}");
        }
    }

    #[test]
    fn test_detect_category_priority_order() {
        let analyzer = SchemaAnalyzer::new();

        // Quarterly terms outrank monthly terms.
        let data = json!([{"Quarter": "Q3", "Month": "Jul"}]);
        assert_eq!(analyzer.detect_category(&data), DataCategory::Quarterly);

        // Bridge terms outrank the customer terms they appear next to.
        let data = json!([{"Customer": "Acme", "Churn": -4}]);
        assert_eq!(analyzer.detect_category(&data), DataCategory::Bridge);

        // Geographic terms outrank customer terms.
        let data = json!([{"Country": "DE", "Customer": "Acme"}]);
        assert_eq!(analyzer.detect_category(&data), DataCategory::Geographic);
    }

    #[test]
    fn test_detect_category_unknown_for_non_tabular_input() {
        let analyzer = SchemaAnalyzer::new();

        assert_eq!(analyzer.detect_category(&json!([])), DataCategory::Unknown);
        assert_eq!(
            analyzer.detect_category(&json!({"quarter": "Q3"})),
            DataCategory::Unknown
        );
        assert_eq!(analyzer.detect_category(&json!(42)), DataCategory::Unknown);
    }

    #[test]
    fn test_detect_category_only_inspects_leading_records() {
        let mut rows: Vec<Value> = (0..5).map(|i| json!({"metric": i})).collect();
        rows.push(json!({"Quarter": "Q3"}));
        let data = Value::Array(rows);

        let analyzer = SchemaAnalyzer::new();
        assert_eq!(analyzer.detect_category(&data), DataCategory::General);

        let wide = SchemaAnalyzer::builder().detect_sample_size(10).build();
        assert_eq!(wide.detect_category(&data), DataCategory::Quarterly);
    }

    #[test]
    fn test_analyze_quarterly_dataset() {
        let analyzer = SchemaAnalyzer::new();
        let schema = analyzer.analyze(&quarterly_rows(), "quarterly.json");

        assert_eq!(schema.data_type, DataCategory::Quarterly);
        assert_eq!(schema.structure.kind, StructureKind::ArrayOfObjects);
        assert_eq!(schema.structure.record_count, 3);
        assert_eq!(
            schema.structure.sample_keys,
            vec!["Customer Name", "Quarter 3 Revenue", "Quarter 4 Revenue"]
        );

        assert_eq!(schema.columns.len(), 3);
        assert_eq!(
            schema.columns["Quarter 3 Revenue"].column_type,
            ColumnType::Numeric
        );

        assert_eq!(
            schema.metrics.revenue_columns,
            vec!["Quarter 3 Revenue", "Quarter 4 Revenue"]
        );
        assert_eq!(schema.metrics.id_columns, vec!["Customer Name"]);

        // Revenue rules fire first, then the id-driven concentration rules.
        assert_eq!(
            schema.suggested_visualizations,
            vec![
                ChartKind::BarChart,
                ChartKind::LineChart,
                ChartKind::MetricCards,
                ChartKind::Treemap,
                ChartKind::ParetoChart,
                ChartKind::ConcentrationAnalysis,
            ]
        );

        // 30 category + 6 columns + 15 memberships + 20 suggestions.
        assert_eq!(schema.confidence_score, 71);
    }

    #[test]
    fn test_analyze_empty_input_skips_cache() {
        let analyzer = SchemaAnalyzer::new();

        for data in [json!(null), json!([]), json!({}), json!("")] {
            let schema = analyzer.analyze(&data, "empty");
            assert_eq!(schema.data_type, DataCategory::Unknown);
            assert!(schema.columns.is_empty());
            assert!(schema.suggested_visualizations.is_empty());
            assert_eq!(schema.confidence_score, 0);
        }

        assert!(analyzer.cache().is_empty());
        assert_eq!(analyzer.analysis_runs(), 0);
    }

    #[test]
    fn test_analyze_reuses_cached_schema() {
        let analyzer = SchemaAnalyzer::new();
        let data = quarterly_rows();

        let first = analyzer.analyze(&data, "quarterly.json");
        let second = analyzer.analyze(&data, "quarterly.json");

        assert_eq!(first, second);
        assert_eq!(analyzer.analysis_runs(), 1);
        assert_eq!(analyzer.cache().len(), 1);
    }

    #[test]
    fn test_analyze_separates_discriminators() {
        let analyzer = SchemaAnalyzer::new();
        let data = quarterly_rows();

        analyzer.analyze(&data, "report_a.json");
        analyzer.analyze(&data, "report_b.json");

        assert_eq!(analyzer.analysis_runs(), 2);
        assert_eq!(analyzer.cache().len(), 2);
    }

    #[test]
    fn test_analyze_recomputes_after_cache_clear() {
        let analyzer = SchemaAnalyzer::new();
        let data = quarterly_rows();

        analyzer.analyze(&data, "quarterly.json");
        analyzer.cache().clear();
        analyzer.analyze(&data, "quarterly.json");

        assert_eq!(analyzer.analysis_runs(), 2);
        assert_eq!(analyzer.cache().len(), 1);
    }

    #[test]
    fn test_analyze_single_object_degrades_gracefully() {
        let analyzer = SchemaAnalyzer::new();
        let schema = analyzer.analyze(&json!({"Region": "EMEA", "Total": 9001}), "summary");

        assert_eq!(schema.data_type, DataCategory::Unknown);
        assert_eq!(schema.structure.kind, StructureKind::SingleObject);
        assert_eq!(schema.structure.record_count, 1);
        assert_eq!(schema.structure.sample_keys, vec!["Region", "Total"]);
        assert!(schema.columns.is_empty());
        assert!(schema.metrics.is_empty());
        assert_eq!(
            schema.suggested_visualizations,
            vec![ChartKind::Table, ChartKind::BarChart, ChartKind::SummaryMetrics]
        );
        assert_eq!(schema.confidence_score, 20);

        // Non-empty single objects are analyzable and therefore cached.
        assert_eq!(analyzer.analysis_runs(), 1);
        assert_eq!(analyzer.cache().len(), 1);
    }

    #[test]
    fn test_shared_cache_between_analyzers() {
        let cache = Arc::new(TtlCache::new());
        let first = SchemaAnalyzer::builder().cache(Arc::clone(&cache)).build();
        let second = SchemaAnalyzer::builder().cache(Arc::clone(&cache)).build();

        first.analyze(&quarterly_rows(), "quarterly.json");
        second.analyze(&quarterly_rows(), "quarterly.json");

        assert_eq!(first.analysis_runs(), 1);
        assert_eq!(second.analysis_runs(), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_confidence_term_caps() {
        let profile = |name: &str| ColumnProfile {
            name: name.to_string(),
            column_type: ColumnType::Numeric,
            non_null_count: 1,
            null_count: 0,
            unique_count: 1,
            sample_values: vec![json!(1)],
            numeric_summary: None,
        };

        let mut columns = BTreeMap::new();
        for i in 0..15 {
            let name = format!("col_{i}");
            columns.insert(name.clone(), profile(&name));
        }
        let metrics = MetricGroups {
            revenue_columns: (0..7).map(|i| format!("rev_{i}")).collect(),
            ..MetricGroups::default()
        };

        // 30 + capped 20 + capped 30 + 20 = 100.
        let score = calculate_confidence(
            DataCategory::Quarterly,
            &columns,
            &metrics,
            &[ChartKind::Table],
        );
        assert_eq!(score, 100);

        let empty_columns = BTreeMap::new();
        let empty_metrics = MetricGroups::default();
        let score = calculate_confidence(DataCategory::Unknown, &empty_columns, &empty_metrics, &[]);
        assert_eq!(score, 0);

        // Partial credit: 30 + 4 + 5 + 20.
        let mut two_columns = BTreeMap::new();
        two_columns.insert("a".to_string(), profile("a"));
        two_columns.insert("b".to_string(), profile("b"));
        let one_metric = MetricGroups {
            date_columns: vec!["a".to_string()],
            ..MetricGroups::default()
        };
        let score = calculate_confidence(
            DataCategory::Monthly,
            &two_columns,
            &one_metric,
            &[ChartKind::LineChart],
        );
        assert_eq!(score, 59);
    }

    #[test]
    fn test_category_tag_round_trip() {
        let tags = [
            DataCategory::Quarterly,
            DataCategory::Bridge,
            DataCategory::Geographic,
            DataCategory::Customer,
            DataCategory::Monthly,
            DataCategory::General,
            DataCategory::Unknown,
        ];
        for tag in tags {
            assert_eq!(tag.as_str().parse::<DataCategory>().unwrap(), tag);
        }

        assert!("weekly".parse::<DataCategory>().is_err());
    }

    #[test]
    fn test_schema_json_round_trip() {
        let analyzer = SchemaAnalyzer::new();
        let schema = analyzer.analyze(&quarterly_rows(), "quarterly.json");

        let json = schema.to_json().unwrap();
        assert!(json.contains("\"data_type\":\"quarterly\""));
        assert!(json.contains("\"confidence_score\":71"));

        let parsed = Schema::from_json(&json).unwrap();
        assert_eq!(parsed, schema);
    }
}
