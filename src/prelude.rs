//! Prelude for commonly used types in datasense.

pub use crate::analyzers::{
    AnalyzerConfig, AnalyzerError, AnalyzerResult, ChartKind, ColumnProfile, ColumnType,
    DataCategory, MetricGroups, Schema, SchemaAnalyzer, SchemaAnalyzerBuilder,
};
pub use crate::cache::{CacheStats, TtlCache};
pub use crate::dataset::{DatasetStructure, StructureKind};
pub use crate::logging::LoggingConfig;
pub use crate::router::{PatternRouter, PatternTag, RouterConfig};
