//! Declarative keyword vocabularies for intent classification.
//!
//! Every classification axis is described by one table: label → keywords,
//! phrases, and bonus triggers. The tables are consumed by the generic
//! matcher in [`extractor`](super::extractor) and scored by the intent
//! classifier; keeping them in one place makes the precedence rules
//! auditable without reading any matching code.
//!
//! Table order matters: within an axis the entries are listed in tie-break
//! priority order, and the question-type rules are evaluated first-match.

use crate::intent::{ChartKind, DataFocus, QuestionType};

/// Score contribution of a single matched keyword.
pub const KEYWORD_WEIGHT: u32 = 2;
/// Score contribution of a matched multi-word phrase.
pub const PHRASE_WEIGHT: u32 = 3;
/// Score contribution of an axis-specific strong signal.
pub const BONUS_WEIGHT: u32 = 5;

/// Vocabulary for one label on a classification axis.
#[derive(Debug, Clone, Copy)]
pub struct AxisVocabulary<L: Copy> {
    /// The label this vocabulary scores for.
    pub label: L,
    /// Single keywords, matched anywhere in the folded question.
    pub keywords: &'static [&'static str],
    /// Multi-word phrases, matched anywhere in the folded question.
    pub phrases: &'static [&'static str],
    /// Strong signals that add a fixed bonus on top of keyword/phrase hits.
    pub bonus_triggers: &'static [&'static str],
}

/// Chart-kind vocabulary, in tie-break priority order: pie, bar, line,
/// scatter. "distribution" strongly implies a pie chart; ranking words
/// strongly imply bars; temporal words strongly imply a line.
pub const CHART_VOCABULARY: &[AxisVocabulary<ChartKind>] = &[
    AxisVocabulary {
        label: ChartKind::Pie,
        keywords: &[
            "pie",
            "distribution",
            "proportion",
            "percentage",
            "share",
            "breakdown",
        ],
        phrases: &["pie chart", "show distribution", "break down", "proportion of"],
        bonus_triggers: &["distribution", "proportion", "breakdown", "share"],
    },
    AxisVocabulary {
        label: ChartKind::Bar,
        keywords: &[
            "bar",
            "compare",
            "comparison",
            "ranking",
            "top",
            "highest",
            "lowest",
        ],
        phrases: &["bar chart", "compare", "rank", "top 10", "highest", "lowest"],
        bonus_triggers: &["compare", "top", "highest", "lowest", "rank"],
    },
    AxisVocabulary {
        label: ChartKind::Line,
        keywords: &[
            "line",
            "trend",
            "over time",
            "timeline",
            "progression",
            "change",
        ],
        phrases: &["line chart", "over time", "trend analysis", "time series"],
        bonus_triggers: &["trend", "over time", "monthly", "progression"],
    },
    AxisVocabulary {
        label: ChartKind::Scatter,
        keywords: &["scatter", "correlation", "relationship", "versus", "vs"],
        phrases: &["scatter plot", "correlation", "relationship between"],
        bonus_triggers: &[],
    },
];

/// Data-focus vocabulary, in tie-break priority order: defects, parts,
/// trends, performance.
pub const FOCUS_VOCABULARY: &[AxisVocabulary<DataFocus>] = &[
    AxisVocabulary {
        label: DataFocus::Defects,
        keywords: &[
            "defect",
            "rejection",
            "reason",
            "cause",
            "problem",
            "issue",
            "fault",
        ],
        phrases: &["rejection reasons", "defect types", "why rejected", "causes of"],
        bonus_triggers: &[],
    },
    AxisVocabulary {
        label: DataFocus::Parts,
        keywords: &["part", "component", "item", "product", "piece"],
        phrases: &["part number", "which part", "part analysis", "component"],
        bonus_triggers: &[],
    },
    AxisVocabulary {
        label: DataFocus::Trends,
        keywords: &[
            "trend",
            "time",
            "monthly",
            "daily",
            "weekly",
            "over time",
            "progression",
        ],
        phrases: &["over time", "trend analysis", "time series", "monthly trends"],
        bonus_triggers: &[],
    },
    AxisVocabulary {
        label: DataFocus::Performance,
        keywords: &[
            "performance",
            "quality",
            "efficiency",
            "rate",
            "ratio",
            "percentage",
        ],
        phrases: &["rejection rate", "quality performance", "efficiency analysis"],
        bonus_triggers: &[],
    },
];

/// Question-type trigger rules, evaluated first-match in exactly this
/// order. The ordering is a deliberate precedence policy: a question that
/// says both "compare" and "top" is a comparison, not a ranking.
pub const QUESTION_TYPE_RULES: &[(QuestionType, &[&str])] = &[
    (
        QuestionType::Comparison,
        &["compare", "versus", "vs", "difference", "better", "worse"],
    ),
    (
        QuestionType::Ranking,
        &["top", "highest", "lowest", "best", "worst", "rank"],
    ),
    (
        QuestionType::Quantity,
        &["how many", "count", "number", "total", "sum"],
    ),
    (
        QuestionType::Analysis,
        &["analyze", "analysis", "insight", "pattern", "trend"],
    ),
    (
        QuestionType::Visualization,
        &["chart", "graph", "plot", "draw", "show", "visualize"],
    ),
    (
        QuestionType::Specific,
        &["which", "what", "when", "where", "who"],
    ),
    (
        QuestionType::Temporal,
        &["when", "date", "time", "month", "day", "year"],
    ),
];

/// Generic visualization cue words. A question containing any of these is
/// routed to the charting handler regardless of its data focus.
pub const VISUALIZATION_CUES: &[&str] = &["chart", "graph", "plot", "draw", "show", "visualize"];

/// Causal cue words that mark a question as context-dependent on their
/// own.
pub const CAUSAL_REFERENCE_CUES: &[&str] = &["why", "what caused", "because"];

/// Cue words from the follow-up vocabulary that are too common to trigger
/// resolution alone ("how many ...", "top rejection reasons ..."); they
/// only corroborate a strong cue.
pub const WEAK_REFERENCE_CUES: &[&str] = &["how", "reason"];

/// Pronoun references that reuse the current focus entity directly.
pub const PRONOUN_REFERENCES: &[&str] = &["this part", "that part"];

/// Lowercase English month names, January first.
pub const MONTH_NAMES: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];
