//! Deterministic additive-scoring intent classifier.

use log::debug;

use crate::analysis::features::{ExtractedFeatures, LabelMatches};
use crate::analysis::vocabulary::{BONUS_WEIGHT, KEYWORD_WEIGHT, PHRASE_WEIGHT};
use crate::intent::types::{ChartKind, DataFocus, Intent, QuestionType, TimeScope};

/// Classifies extracted features into an [`Intent`].
///
/// Scoring per axis is additive: each matched keyword contributes
/// [`KEYWORD_WEIGHT`], each phrase [`PHRASE_WEIGHT`], each bonus trigger
/// [`BONUS_WEIGHT`]. The axis winner is the label with the strictly
/// highest score; a tie falls to the earlier entry in the vocabulary
/// table, and an axis with no hits at all resolves to its explicit
/// "no preference" label. The question type instead takes the first
/// matching rule from the ordered trigger list.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentClassifier;

impl IntentClassifier {
    /// Create a new classifier.
    pub fn new() -> Self {
        IntentClassifier
    }

    /// Classify one question. Deterministic and infallible: repeated calls
    /// over the same features return the same intent.
    pub fn classify(&self, features: &ExtractedFeatures, question: &str) -> Intent {
        let chart_type = score_axis(&features.chart_matches).unwrap_or(ChartKind::Auto);
        let data_focus = score_axis(&features.focus_matches).unwrap_or(DataFocus::Auto);
        let question_type = features
            .question_types
            .first()
            .copied()
            .unwrap_or(QuestionType::General);

        let time_scope = features
            .month_mentions
            .first()
            .map(|m| TimeScope::Month { month: m.month, year: m.year })
            .or(features.latest_month.then_some(TimeScope::LatestMonth));

        let intent = Intent {
            question_type,
            data_focus,
            chart_type,
            requested_count: features.requested_count,
            time_scope,
            referenced_entity: features.entities.first().cloned(),
        };

        debug!(
            "classified {question:?}: type={question_type:?} focus={data_focus:?} \
             chart={chart_type:?} count={:?}",
            intent.requested_count
        );
        intent
    }
}

/// Score one axis and return the winning label, or `None` when every label
/// scored zero.
fn score_axis<L: Copy>(matches: &[LabelMatches<L>]) -> Option<L> {
    let mut winner: Option<L> = None;
    let mut best = 0u32;

    for entry in matches {
        let score = entry.keyword_hits * KEYWORD_WEIGHT
            + entry.phrase_hits * PHRASE_WEIGHT
            + entry.bonus_hits * BONUS_WEIGHT;
        // Strictly greater: on a tie the earlier (higher-priority) label
        // keeps the win.
        if score > best {
            best = score;
            winner = Some(entry.label);
        }
    }
    winner
}
