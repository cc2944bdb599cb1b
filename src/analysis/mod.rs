//! Lexical feature extraction for question understanding.
//!
//! This module turns a raw question string into [`ExtractedFeatures`]:
//! vocabulary matches per classification axis, a raw "top N" count, month
//! mentions, and identifier-shaped entity candidates. Extraction is pure
//! and never fails; an absent match simply yields an empty feature set.

pub mod extractor;
pub mod features;
pub mod vocabulary;

pub use extractor::{FeatureExtractor, entity_candidates};
pub use features::{ExtractedFeatures, LabelMatches, MonthMention};
pub use vocabulary::{
    AxisVocabulary, CHART_VOCABULARY, FOCUS_VOCABULARY, KEYWORD_WEIGHT, PHRASE_WEIGHT,
    BONUS_WEIGHT, QUESTION_TYPE_RULES, VISUALIZATION_CUES,
};
