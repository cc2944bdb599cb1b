//! The lexical feature extractor.
//!
//! One pass over the question produces all the raw signals the classifier
//! and resolver need: vocabulary hits per axis, the requested result count,
//! month mentions, and entity candidates. Extraction is a pure function of
//! the input string.

use std::sync::LazyLock;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::analysis::features::{ExtractedFeatures, LabelMatches, MonthMention};
use crate::analysis::vocabulary::{
    AxisVocabulary, CHART_VOCABULARY, FOCUS_VOCABULARY, MONTH_NAMES, QUESTION_TYPE_RULES,
};
use crate::intent::QuestionType;

/// Minimum length for entity candidates found in a question or answer.
pub const ENTITY_MIN_LEN_STRICT: usize = 5;

/// Looser minimum used by the resolver's final fall-back scan. Tokens this
/// short must carry a digit to qualify.
pub const ENTITY_MIN_LEN_LOOSE: usize = 3;

/// Digit-run length that qualifies as a bare part number.
const PART_NUMBER_MIN_DIGITS: usize = 8;

/// "top N" / "first N" / "N most" / "N highest" count phrasing.
static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"top\s*(\d+)|first\s*(\d+)|(\d+)\s*most|(\d+)\s*highest")
        .expect("count pattern should be valid")
});

/// Uppercase-led identifier runs and bare digit runs.
static ENTITY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z][A-Z0-9-]{2,}|\d{8,}").expect("entity pattern should be valid"));

/// Month names with an optional trailing year.
static MONTH_RE: LazyLock<Regex> = LazyLock::new(|| {
    let names = MONTH_NAMES.join("|");
    Regex::new(&format!(r"\b({names})(?:\s+(\d{{4}}))?\b")).expect("month pattern should be valid")
});

/// Stateless extractor for lexical question features.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeatureExtractor;

impl FeatureExtractor {
    /// Create a new feature extractor.
    pub fn new() -> Self {
        FeatureExtractor
    }

    /// Extract all lexical features from a question.
    ///
    /// Never fails; a question that matches nothing yields empty feature
    /// sets, which the classifier resolves to explicit "no preference"
    /// labels.
    pub fn extract(&self, question: &str) -> ExtractedFeatures {
        let folded = question.to_lowercase();
        let words: Vec<String> = folded.unicode_words().map(str::to_string).collect();

        ExtractedFeatures {
            chart_matches: match_axis(CHART_VOCABULARY, &folded),
            focus_matches: match_axis(FOCUS_VOCABULARY, &folded),
            question_types: match_question_types(&folded),
            requested_count: extract_count(&folded),
            month_mentions: extract_months(&folded),
            latest_month: folded.contains("this month"),
            entities: entity_candidates(question, ENTITY_MIN_LEN_STRICT),
            folded,
            words,
        }
    }
}

/// Count vocabulary hits for every label on one axis.
fn match_axis<L: Copy>(vocabulary: &[AxisVocabulary<L>], folded: &str) -> Vec<LabelMatches<L>> {
    vocabulary
        .iter()
        .map(|entry| LabelMatches {
            label: entry.label,
            keyword_hits: count_hits(entry.keywords, folded),
            phrase_hits: count_hits(entry.phrases, folded),
            bonus_hits: count_hits(entry.bonus_triggers, folded),
        })
        .collect()
}

fn count_hits(terms: &[&str], folded: &str) -> u32 {
    terms.iter().filter(|term| folded.contains(*term)).count() as u32
}

/// Collect the question types whose trigger lists matched, preserving the
/// rule order so the classifier can take the first.
fn match_question_types(folded: &str) -> Vec<QuestionType> {
    QUESTION_TYPE_RULES
        .iter()
        .filter(|(_, triggers)| triggers.iter().any(|t| folded.contains(t)))
        .map(|(question_type, _)| *question_type)
        .collect()
}

/// Pull the first requested count out of "top N" style phrasing.
///
/// Returns the raw integer; clamping to a sane range is the router's job.
fn extract_count(folded: &str) -> Option<u64> {
    let captures = COUNT_RE.captures(folded)?;
    (1..=4)
        .filter_map(|i| captures.get(i))
        .find_map(|m| m.as_str().parse().ok())
}

/// Collect month mentions with optional years.
fn extract_months(folded: &str) -> Vec<MonthMention> {
    MONTH_RE
        .captures_iter(folded)
        .filter_map(|captures| {
            let name = captures.get(1)?.as_str();
            let year = captures.get(2).and_then(|m| m.as_str().parse().ok());
            // "may" doubles as a modal verb; only a trailing year makes it
            // unambiguous.
            if name == "may" && year.is_none() {
                return None;
            }
            let month = MONTH_NAMES.iter().position(|m| *m == name)? as u32 + 1;
            Some(MonthMention { month, year })
        })
        .collect()
}

/// Scan text for identifier-shaped entity candidates.
///
/// A candidate is an uppercase-led run over `[A-Z0-9-]` of at least
/// `min_len` characters (tokens shorter than the strict minimum must carry
/// a digit), or a bare digit run of part-number length. Candidates are
/// returned in first-seen order without duplicates.
pub fn entity_candidates(text: &str, min_len: usize) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();

    for m in ENTITY_RE.find_iter(text) {
        let token = m.as_str().trim_end_matches('-');
        if !is_entity_shaped(token, min_len) {
            continue;
        }
        if !seen.iter().any(|s| s == token) {
            seen.push(token.to_string());
        }
    }
    seen
}

fn is_entity_shaped(token: &str, min_len: usize) -> bool {
    if token.len() < min_len {
        return false;
    }
    if token.chars().all(|c| c.is_ascii_digit()) {
        return token.len() >= PART_NUMBER_MIN_DIGITS;
    }
    token.len() >= ENTITY_MIN_LEN_STRICT || token.chars().any(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::intent::{ChartKind, DataFocus};

    fn matches_for<L: Copy + PartialEq>(
        matches: &[LabelMatches<L>],
        label: L,
    ) -> LabelMatches<L> {
        *matches.iter().find(|m| m.label == label).unwrap()
    }

    #[test]
    fn test_extract_is_case_insensitive() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("Show Me A PIE Chart");

        let pie = matches_for(&features.chart_matches, ChartKind::Pie);
        assert_eq!(pie.keyword_hits, 1);
        assert_eq!(pie.phrase_hits, 1); // "pie chart"
    }

    #[test]
    fn test_requested_count_patterns() {
        let extractor = FeatureExtractor::new();

        assert_eq!(extractor.extract("top 5 rejection reasons").requested_count, Some(5));
        assert_eq!(extractor.extract("first 3 defects").requested_count, Some(3));
        assert_eq!(extractor.extract("the 7 most common causes").requested_count, Some(7));
        assert_eq!(extractor.extract("4 highest rejections").requested_count, Some(4));
        assert_eq!(extractor.extract("top defects").requested_count, None);
        // Raw value is reported as-is; range enforcement happens later.
        assert_eq!(extractor.extract("top 47 reasons").requested_count, Some(47));
        assert_eq!(extractor.extract("top 0 reasons").requested_count, Some(0));
    }

    #[test]
    fn test_month_mentions() {
        let extractor = FeatureExtractor::new();

        let features = extractor.extract("how many rejections in june 2024?");
        assert_eq!(
            features.month_mentions,
            vec![MonthMention { month: 6, year: Some(2024) }]
        );

        let features = extractor.extract("rejections in march");
        assert_eq!(features.month_mentions, vec![MonthMention { month: 3, year: None }]);

        // Bare "may" reads as a modal verb, not a month.
        let features = extractor.extract("how may rejections happen");
        assert!(features.month_mentions.is_empty());
        let features = extractor.extract("rejections in may 2024");
        assert_eq!(
            features.month_mentions,
            vec![MonthMention { month: 5, year: Some(2024) }]
        );
    }

    #[test]
    fn test_entity_candidates() {
        assert_eq!(
            entity_candidates("why does PART-1001 fail?", ENTITY_MIN_LEN_STRICT),
            vec!["PART-1001".to_string()]
        );
        // Bare digit runs of part-number length qualify.
        assert_eq!(
            entity_candidates("total for part 30534763", ENTITY_MIN_LEN_STRICT),
            vec!["30534763".to_string()]
        );
        // Short digit runs and short uppercase tokens do not.
        assert!(entity_candidates("top 10 in june 2024", ENTITY_MIN_LEN_STRICT).is_empty());
        assert!(entity_candidates("the QC report", ENTITY_MIN_LEN_STRICT).is_empty());
        // Loose scan accepts shorter tokens when they carry a digit.
        assert_eq!(
            entity_candidates("unit AB-1 leads", ENTITY_MIN_LEN_LOOSE),
            vec!["AB-1".to_string()]
        );
        assert!(entity_candidates("unit AB-1 leads", ENTITY_MIN_LEN_STRICT).is_empty());
    }

    #[test]
    fn test_entity_candidates_dedup_first_seen() {
        let found = entity_candidates(
            "PART-1001 beats PART-2002, then PART-1001 again",
            ENTITY_MIN_LEN_STRICT,
        );
        assert_eq!(found, vec!["PART-1001".to_string(), "PART-2002".to_string()]);
    }

    #[test]
    fn test_question_type_rule_order_preserved() {
        let extractor = FeatureExtractor::new();
        // "compare" and "top" both match; comparison is listed first.
        let features = extractor.extract("compare the top parts");
        assert_eq!(features.question_types[0], QuestionType::Comparison);
    }

    #[test]
    fn test_silent_question() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("hello there");
        assert!(features.is_silent());
        assert!(features.entities.is_empty());
        assert!(features.requested_count.is_none());
    }

    #[test]
    fn test_axis_matches_do_not_cross() {
        let extractor = FeatureExtractor::new();
        let features = extractor.extract("pie distribution please");

        let defects = matches_for(&features.focus_matches, DataFocus::Defects);
        assert!(defects.is_empty());
        let pie = matches_for(&features.chart_matches, ChartKind::Pie);
        assert!(pie.keyword_hits >= 2);
    }
}
