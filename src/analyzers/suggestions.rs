//! Visualization suggestions derived from a schema's shape.
//!
//! A small rule table maps the detected data category and metric groups to
//! an ordered list of chart tags. Rules are additive and evaluated top to
//! bottom: every rule that fires appends its tags in rule order, duplicates
//! included, so the first-listed tag is the preferred one. Only when no rule
//! fires does the exclusive fallback apply.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::analyzers::errors::AnalyzerError;
use crate::analyzers::metrics::MetricGroups;
use crate::analyzers::schema::DataCategory;

/// Chart and widget tags understood by the rendering layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    BarChart,
    LineChart,
    MetricCards,
    PieChart,
    Treemap,
    AreaChart,
    ParetoChart,
    ConcentrationAnalysis,
    WaterfallChart,
    SankeyDiagram,
    Table,
    SummaryMetrics,
}

impl ChartKind {
    /// The chart tag as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::BarChart => "bar_chart",
            ChartKind::LineChart => "line_chart",
            ChartKind::MetricCards => "metric_cards",
            ChartKind::PieChart => "pie_chart",
            ChartKind::Treemap => "treemap",
            ChartKind::AreaChart => "area_chart",
            ChartKind::ParetoChart => "pareto_chart",
            ChartKind::ConcentrationAnalysis => "concentration_analysis",
            ChartKind::WaterfallChart => "waterfall_chart",
            ChartKind::SankeyDiagram => "sankey_diagram",
            ChartKind::Table => "table",
            ChartKind::SummaryMetrics => "summary_metrics",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChartKind {
    type Err = AnalyzerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar_chart" => Ok(ChartKind::BarChart),
            "line_chart" => Ok(ChartKind::LineChart),
            "metric_cards" => Ok(ChartKind::MetricCards),
            "pie_chart" => Ok(ChartKind::PieChart),
            "treemap" => Ok(ChartKind::Treemap),
            "area_chart" => Ok(ChartKind::AreaChart),
            "pareto_chart" => Ok(ChartKind::ParetoChart),
            "concentration_analysis" => Ok(ChartKind::ConcentrationAnalysis),
            "waterfall_chart" => Ok(ChartKind::WaterfallChart),
            "sankey_diagram" => Ok(ChartKind::SankeyDiagram),
            "table" => Ok(ChartKind::Table),
            "summary_metrics" => Ok(ChartKind::SummaryMetrics),
            other => Err(AnalyzerError::unknown_chart_kind(other)),
        }
    }
}

/// Suggests chart tags for a dataset's category and metric groups.
///
/// Rule order, each additive:
/// 1. any revenue column: bar_chart, line_chart, metric_cards
/// 2. geographic category: pie_chart, treemap, bar_chart
/// 3. any date column: line_chart, area_chart
/// 4. customer category or any id column: treemap, pareto_chart,
///    concentration_analysis
/// 5. bridge category: waterfall_chart, sankey_diagram
///
/// When nothing fires: table, bar_chart, summary_metrics.
pub fn suggest_charts(category: DataCategory, metrics: &MetricGroups) -> Vec<ChartKind> {
    let mut suggestions = Vec::new();

    if !metrics.revenue_columns.is_empty() {
        suggestions.extend([
            ChartKind::BarChart,
            ChartKind::LineChart,
            ChartKind::MetricCards,
        ]);
    }

    if category == DataCategory::Geographic {
        suggestions.extend([ChartKind::PieChart, ChartKind::Treemap, ChartKind::BarChart]);
    }

    if !metrics.date_columns.is_empty() {
        suggestions.extend([ChartKind::LineChart, ChartKind::AreaChart]);
    }

    if category == DataCategory::Customer || !metrics.id_columns.is_empty() {
        suggestions.extend([
            ChartKind::Treemap,
            ChartKind::ParetoChart,
            ChartKind::ConcentrationAnalysis,
        ]);
    }

    if category == DataCategory::Bridge {
        suggestions.extend([ChartKind::WaterfallChart, ChartKind::SankeyDiagram]);
    }

    if suggestions.is_empty() {
        suggestions = vec![ChartKind::Table, ChartKind::BarChart, ChartKind::SummaryMetrics];
    }

    suggestions
}
