//! Intent value types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of question being asked.
///
/// Resolved by an ordered first-match rule list; [`QuestionType::General`]
/// is the explicit fallback when no trigger matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionType {
    /// "compare", "versus", "difference"
    Comparison,
    /// "top", "highest", "lowest", "rank"
    Ranking,
    /// "how many", "count", "total"
    Quantity,
    /// "analyze", "insight", "pattern"
    Analysis,
    /// "chart", "graph", "show"
    Visualization,
    /// "which", "what", "where"
    Specific,
    /// "when", "date", "month"
    Temporal,
    /// Nothing matched.
    General,
}

/// Which slice of the dataset a question concerns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFocus {
    /// Defect categories and rejection reasons.
    Defects,
    /// Individual part identifiers.
    Parts,
    /// Time-bucketed movement.
    Trends,
    /// Rates and ratios.
    Performance,
    /// No stated preference.
    Auto,
}

/// Requested chart kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Share-of-whole distribution.
    Pie,
    /// Ranked comparison.
    Bar,
    /// Movement over time.
    Line,
    /// Pairwise relationship.
    Scatter,
    /// No stated preference.
    Auto,
}

impl ChartKind {
    /// Human-readable label for chart titles.
    pub fn as_str(&self) -> &'static str {
        match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
            ChartKind::Line => "line",
            ChartKind::Scatter => "scatter",
            ChartKind::Auto => "auto",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A time restriction stated by the question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeScope {
    /// A named month, optionally with an explicit year.
    Month {
        /// Month number, 1-based.
        month: u32,
        /// Explicit year, when stated.
        year: Option<i32>,
    },
    /// "this month" relative to the newest data on record.
    LatestMonth,
}

/// The classifier's structured output for one question.
///
/// At most one value per axis; `Auto`/`General` are valid values that the
/// router resolves, never an ambiguity left to the caller. The requested
/// count is raw here and clamped at the router boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Question-type axis.
    pub question_type: QuestionType,
    /// Data-focus axis.
    pub data_focus: DataFocus,
    /// Chart-kind axis.
    pub chart_type: ChartKind,
    /// Raw "top N" count from the question, if any.
    pub requested_count: Option<u64>,
    /// Month restriction, if any.
    pub time_scope: Option<TimeScope>,
    /// Entity named by the question itself, or attached later by
    /// reference resolution.
    pub referenced_entity: Option<String>,
}

impl Default for Intent {
    fn default() -> Self {
        Intent {
            question_type: QuestionType::General,
            data_focus: DataFocus::Auto,
            chart_type: ChartKind::Auto,
            requested_count: None,
            time_scope: None,
            referenced_entity: None,
        }
    }
}
