//! Follow-up reference resolution.
//!
//! A follow-up like "why does this part fail so much?" carries no entity of
//! its own; the referent has to come from conversational context. The
//! resolver first reuses the dedicated focus-entity slot, then falls back
//! to scanning the previous answer and question for identifier-shaped
//! tokens.

use std::sync::LazyLock;

use log::debug;
use regex::Regex;

use crate::analysis::extractor::{ENTITY_MIN_LEN_LOOSE, ENTITY_MIN_LEN_STRICT, entity_candidates};
use crate::analysis::features::{ExtractedFeatures, LabelMatches};
use crate::analysis::vocabulary::{CAUSAL_REFERENCE_CUES, PRONOUN_REFERENCES};
use crate::context::store::DialogueContext;

/// Explicit "part number X" / "part name X" phrasing in a prior question.
static PART_PHRASE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)part\s+(?:number|name)\s+([A-Za-z0-9-]+)")
        .expect("part phrase pattern should be valid")
});

/// Outcome of a resolution attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The question stands on its own; classify and route normally.
    NotContextual,
    /// The question refers back to this entity.
    Resolved(String),
    /// The question is context-dependent but no referent could be
    /// determined. Callers surface a clarification request; guessing an
    /// arbitrary entity is never acceptable.
    Unresolved,
}

/// Resolves context-dependent questions against the dialogue context.
///
/// Only strong cue words ("why", "what caused", "because", "this part",
/// "that part") mark a question as context-dependent. "how" and "reason"
/// appear in too many first-turn questions to trigger on their own; see
/// [`WEAK_REFERENCE_CUES`](crate::analysis::vocabulary::WEAK_REFERENCE_CUES).
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceResolver;

impl ReferenceResolver {
    /// Create a new resolver.
    pub fn new() -> Self {
        ReferenceResolver
    }

    /// Attempt to resolve the referent of a question.
    ///
    /// Resolution order, first success wins:
    ///
    /// 1. an entity named by the question itself (an explicit mention is
    ///    never overridden by stored context),
    /// 2. the current focus entity, for pronoun references,
    /// 3. a strict entity scan of the previous answer,
    /// 4. explicit "part number/name X" phrasing in the previous question,
    /// 5. a looser entity scan of the previous answer.
    ///
    /// A pronoun reference with an empty focus slot only reaches the text
    /// scans when a causal cue is present and a previous turn exists;
    /// otherwise the referent is undeterminable and the resolver says so
    /// instead of picking an arbitrary entity. A causal question with no
    /// history resolves to [`Resolution::NotContextual`] when it still
    /// carries its own data-focus signal ("what caused the most
    /// rejections?" is answerable as a plain defect question), and to
    /// [`Resolution::Unresolved`] when it carries none ("why?").
    pub fn resolve(&self, features: &ExtractedFeatures, ctx: &DialogueContext) -> Resolution {
        let pronoun = has_pronoun_reference(features);
        let causal = has_causal_cue(features);
        if !pronoun && !causal {
            return Resolution::NotContextual;
        }

        if let Some(entity) = features.entities.first() {
            debug!("reference resolved from the question itself: {entity}");
            return Resolution::Resolved(entity.clone());
        }

        if pronoun {
            if let Some(entity) = ctx.current_focus_entity() {
                debug!("reference resolved from focus slot: {entity}");
                return Resolution::Resolved(entity.to_string());
            }
            if !causal || !ctx.has_history() {
                debug!("pronoun reference with empty focus slot");
                return Resolution::Unresolved;
            }
        }

        if !ctx.has_history() {
            if features.focus_matches.iter().all(LabelMatches::is_empty) {
                debug!("context-dependent question with no history");
                return Resolution::Unresolved;
            }
            // No history to draw on, but the question classifies on its
            // own; let normal routing answer it.
            return Resolution::NotContextual;
        }

        if let Some(entity) = entity_candidates(ctx.last_answer(), ENTITY_MIN_LEN_STRICT)
            .into_iter()
            .next()
        {
            debug!("reference resolved from previous answer: {entity}");
            return Resolution::Resolved(entity);
        }

        if let Some(captures) = PART_PHRASE_RE.captures(ctx.last_question()) {
            let entity = captures[1].to_string();
            debug!("reference resolved from previous question phrasing: {entity}");
            return Resolution::Resolved(entity);
        }

        if let Some(entity) = entity_candidates(ctx.last_answer(), ENTITY_MIN_LEN_LOOSE)
            .into_iter()
            .next()
        {
            debug!("reference resolved from loose answer scan: {entity}");
            return Resolution::Resolved(entity);
        }

        debug!("context-dependent question could not be resolved");
        Resolution::Unresolved
    }
}

fn has_causal_cue(features: &ExtractedFeatures) -> bool {
    CAUSAL_REFERENCE_CUES.iter().any(|cue| {
        if cue.contains(' ') {
            features.has_phrase(cue)
        } else {
            features.has_word(cue)
        }
    })
}

fn has_pronoun_reference(features: &ExtractedFeatures) -> bool {
    PRONOUN_REFERENCES.iter().any(|p| features.has_phrase(p))
}
