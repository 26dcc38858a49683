//! Error types for the analyzer framework.

use thiserror::Error;

/// Result type for analyzer operations.
pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

/// Errors that can occur at the edges of the analysis pipeline.
///
/// The pipeline itself never fails: `analyze` and `detect_pattern` absorb
/// malformed input and degrade to low-confidence results. These errors cover
/// the fallible seams around it, such as parsing tags from strings and
/// serializing schemas for storage.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    /// A string that does not name a known data category.
    #[error("Unknown data category: {0}")]
    UnknownCategory(String),

    /// A string that does not name a known rendering pattern.
    #[error("Unknown pattern tag: {0}")]
    UnknownPattern(String),

    /// A string that does not name a known chart kind.
    #[error("Unknown chart kind: {0}")]
    UnknownChartKind(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AnalyzerError {
    /// Creates an unknown category error with the given tag.
    pub fn unknown_category(tag: impl Into<String>) -> Self {
        Self::UnknownCategory(tag.into())
    }

    /// Creates an unknown pattern error with the given tag.
    pub fn unknown_pattern(tag: impl Into<String>) -> Self {
        Self::UnknownPattern(tag.into())
    }

    /// Creates an unknown chart kind error with the given tag.
    pub fn unknown_chart_kind(tag: impl Into<String>) -> Self {
        Self::UnknownChartKind(tag.into())
    }
}

/// Converts serde_json errors to AnalyzerError.
impl From<serde_json::Error> for AnalyzerError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
