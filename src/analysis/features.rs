//! Feature types produced by lexical extraction.
//!
//! [`ExtractedFeatures`] is derived, ephemeral state: it is owned by one
//! classification pass and discarded after the intent is built. Nothing in
//! here touches the dialogue context.

use crate::intent::{ChartKind, DataFocus, QuestionType};

/// Vocabulary hit counts for one label on one classification axis.
#[derive(Debug, Clone, Copy)]
pub struct LabelMatches<L: Copy> {
    /// The label the hits count towards.
    pub label: L,
    /// Number of matched single keywords.
    pub keyword_hits: u32,
    /// Number of matched multi-word phrases.
    pub phrase_hits: u32,
    /// Number of matched bonus triggers.
    pub bonus_hits: u32,
}

impl<L: Copy> LabelMatches<L> {
    /// True when nothing in this label's vocabulary matched.
    pub fn is_empty(&self) -> bool {
        self.keyword_hits == 0 && self.phrase_hits == 0 && self.bonus_hits == 0
    }
}

/// A month mentioned in the question, with an optional explicit year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthMention {
    /// Month number, 1-based (January = 1).
    pub month: u32,
    /// Year, when the question states one ("june 2024").
    pub year: Option<i32>,
}

/// Everything the lexical pass found in one question.
#[derive(Debug, Clone)]
pub struct ExtractedFeatures {
    /// The case-folded question text.
    pub folded: String,
    /// Lowercased word list, in question order.
    pub words: Vec<String>,
    /// Vocabulary hits per chart-kind label.
    pub chart_matches: Vec<LabelMatches<ChartKind>>,
    /// Vocabulary hits per data-focus label.
    pub focus_matches: Vec<LabelMatches<DataFocus>>,
    /// Question types whose trigger lists matched, in rule order.
    pub question_types: Vec<QuestionType>,
    /// Raw requested count from "top N" phrasing. Unclamped by design;
    /// range enforcement belongs to the router.
    pub requested_count: Option<u64>,
    /// Month mentions, in question order.
    pub month_mentions: Vec<MonthMention>,
    /// True when the question says "this month".
    pub latest_month: bool,
    /// Identifier-shaped entity candidates from the question itself.
    pub entities: Vec<String>,
}

impl ExtractedFeatures {
    /// True when no axis matched anything at all.
    pub fn is_silent(&self) -> bool {
        self.chart_matches.iter().all(LabelMatches::is_empty)
            && self.focus_matches.iter().all(LabelMatches::is_empty)
            && self.question_types.is_empty()
    }

    /// Check whether a single cue word occurs as a whole word.
    pub fn has_word(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    /// Check whether a phrase occurs anywhere in the folded question.
    pub fn has_phrase(&self, phrase: &str) -> bool {
        self.folded.contains(phrase)
    }
}
