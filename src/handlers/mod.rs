//! Aggregation and visualization handlers.
//!
//! Handlers sit at the collaborator boundary: they consume a normalized
//! [`HandlerRequest`] plus the read-only dataset and produce an [`Answer`]
//! with narrative text and, for the charting handler, a structured
//! [`ChartArtifact`]. The engine never specifies a chart encoding; the
//! artifact is an opaque value for the caller to render.

pub mod charts;
pub mod defects;
pub mod parts;
pub mod trends;

use serde::{Deserialize, Serialize};

pub use parts::Superlative;

use crate::intent::{ChartKind, DataFocus, TimeScope};

/// Which handler family a normalized request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HandlerKind {
    /// Chart construction.
    Visualization,
    /// Rejection-reason aggregation.
    RejectionReasons,
    /// Per-part aggregation.
    PartPerformance,
    /// Time-series aggregation.
    Trend,
}

/// The normalized request the router hands to a handler.
///
/// `requested_count`, when present, is already clamped to the supported
/// range; handlers apply their own defaults when it is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HandlerRequest {
    /// Target handler family.
    pub handler: HandlerKind,
    /// Requested chart kind (`Auto` = pick per the fixed policy).
    pub chart_type: ChartKind,
    /// Classified data focus.
    pub data_focus: DataFocus,
    /// Clamped result count, when the question stated one.
    pub requested_count: Option<usize>,
    /// Entity the question concerns, when known.
    pub referenced_entity: Option<String>,
    /// Month restriction, when the question stated one.
    pub time_scope: Option<TimeScope>,
}

/// A labeled data point in a chart series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    /// Category or bucket label.
    pub label: String,
    /// Value at the label.
    pub value: f64,
}

/// One named series of chart data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// Series name, shown in legends.
    pub name: String,
    /// Points in display order.
    pub points: Vec<ChartPoint>,
}

/// A structured chart description.
///
/// Deliberately not an image: rendering belongs to the caller, and the
/// engine treats the artifact as opaque.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartArtifact {
    /// Chart kind (never `Auto` by the time an artifact exists).
    pub kind: ChartKind,
    /// Chart title.
    pub title: String,
    /// Data series.
    pub series: Vec<ChartSeries>,
}

/// A handler's response for one turn: narrative text, optionally with a
/// chart artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    /// Narrative answer text.
    pub text: String,
    /// Chart artifact, when the handler produced one.
    pub chart: Option<ChartArtifact>,
}

impl Answer {
    /// Create a text-only answer.
    pub fn text<S: Into<String>>(text: S) -> Self {
        Answer { text: text.into(), chart: None }
    }

    /// Create an answer carrying a chart artifact.
    pub fn with_chart<S: Into<String>>(text: S, chart: ChartArtifact) -> Self {
        Answer { text: text.into(), chart: Some(chart) }
    }

    /// True when a chart artifact is attached.
    pub fn has_chart(&self) -> bool {
        self.chart.is_some()
    }
}
