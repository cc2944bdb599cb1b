//! Intent routing.
//!
//! One ordered precedence table, evaluated top-down, first match wins:
//!
//! 1. visualization question or any generic visualization cue word →
//!    charting handler,
//! 2. defect focus → rejection-reason aggregation,
//! 3. part focus → part aggregation (branching on highest/lowest),
//! 4. trend focus → time-series aggregation,
//! 5. anything else → rejection-reason summary with a fixed count of 5.
//!
//! The router is also the recovery boundary: a failing handler degrades to
//! the general rejection-reason summary instead of propagating, and every
//! turn (including degraded and clarification turns) is recorded into the
//! dialogue context so conversational continuity survives bad turns.

use log::{debug, warn};

use crate::analysis::vocabulary::VISUALIZATION_CUES;
use crate::context::DialogueContext;
use crate::dataset::Dataset;
use crate::error::Result;
use crate::handlers::{
    Answer, HandlerKind, HandlerRequest, Superlative, charts, defects, parts, trends,
};
use crate::intent::{ChartKind, DataFocus, Intent, QuestionType};

/// Smallest accepted "top N" count; lower requests clamp up.
pub const MIN_REQUESTED_COUNT: u64 = 1;
/// Largest accepted "top N" count; higher requests clamp down.
pub const MAX_REQUESTED_COUNT: u64 = 20;

/// Fixed count used by the safe general fallback.
const FALLBACK_COUNT: usize = 5;

/// Answer text used when a context-dependent question has no referent.
/// Deliberately free of identifier-shaped tokens: this text is recorded as
/// the previous answer and must never be mis-read as naming an entity.
const CLARIFICATION_TEXT: &str =
    "I cannot tell which part this question refers to. Please name the part explicitly \
     and ask again.";

/// Text of last resort when even the fallback aggregation has no data.
const EMPTY_DATASET_TEXT: &str =
    "No inspection data is available to answer this question. Load a dataset with \
     rejection records and ask again.";

/// Dispatches classified intents to handlers.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentRouter;

impl IntentRouter {
    /// Create a new router.
    pub fn new() -> Self {
        IntentRouter
    }

    /// Route a classified intent through the precedence table.
    ///
    /// Infallible: handler errors degrade to the general fallback answer.
    /// Always records the turn into `ctx`.
    pub fn route(
        &self,
        intent: &Intent,
        question: &str,
        dataset: &Dataset,
        ctx: &mut DialogueContext,
    ) -> Answer {
        let folded = question.to_lowercase();
        let result = self.dispatch(intent, &folded, dataset, ctx);

        let answer = result.unwrap_or_else(|error| {
            warn!("handler failed, substituting general fallback: {error}");
            self.fallback_answer(dataset)
        });

        ctx.record(question, &answer.text, intent);
        answer
    }

    /// Route a follow-up that resolved to an entity: the per-part
    /// rejection breakdown, bypassing the general precedence table.
    pub fn route_reference(
        &self,
        entity: &str,
        intent: &Intent,
        question: &str,
        dataset: &Dataset,
        ctx: &mut DialogueContext,
    ) -> Answer {
        debug!("routing resolved reference to entity breakdown: {entity}");
        let answer = defects::entity_breakdown(dataset, entity).unwrap_or_else(|error| {
            warn!("entity breakdown failed, substituting general fallback: {error}");
            self.fallback_answer(dataset)
        });

        ctx.record(question, &answer.text, intent);
        answer
    }

    /// Answer a context-dependent question whose referent could not be
    /// determined. Asking back is the only safe move; guessing an entity
    /// is never acceptable.
    pub fn route_unresolved(
        &self,
        intent: &Intent,
        question: &str,
        ctx: &mut DialogueContext,
    ) -> Answer {
        debug!("unresolved reference, answering with a clarification request");
        let answer = Answer::text(CLARIFICATION_TEXT);
        ctx.record(question, &answer.text, intent);
        answer
    }

    fn dispatch(
        &self,
        intent: &Intent,
        folded: &str,
        dataset: &Dataset,
        ctx: &DialogueContext,
    ) -> Result<Answer> {
        let count = intent
            .requested_count
            .map(|n| n.clamp(MIN_REQUESTED_COUNT, MAX_REQUESTED_COUNT) as usize);

        let wants_visualization = intent.question_type == QuestionType::Visualization
            || VISUALIZATION_CUES.iter().any(|cue| folded.contains(cue));

        if wants_visualization {
            debug!("route: visualization");
            let request = self.request(HandlerKind::Visualization, intent, count, ctx);
            return charts::chart_answer(dataset, &request, folded);
        }

        match intent.data_focus {
            DataFocus::Defects => {
                debug!("route: rejection reasons");
                let request = self.request(HandlerKind::RejectionReasons, intent, count, ctx);
                defects::top_rejection_reasons(dataset, &request)
            }
            DataFocus::Parts => {
                debug!("route: part analysis");
                let request = self.request(HandlerKind::PartPerformance, intent, count, ctx);
                let superlative = detect_superlative(folded);
                parts::part_analysis(dataset, &request, superlative)
            }
            DataFocus::Trends => {
                debug!("route: trend summary");
                trends::trend_summary(dataset)
            }
            _ => {
                debug!("route: general fallback");
                let request = HandlerRequest {
                    handler: HandlerKind::RejectionReasons,
                    chart_type: ChartKind::Auto,
                    data_focus: intent.data_focus,
                    requested_count: Some(FALLBACK_COUNT),
                    referenced_entity: intent.referenced_entity.clone(),
                    time_scope: intent.time_scope,
                };
                defects::top_rejection_reasons(dataset, &request)
            }
        }
    }

    /// Build the normalized handler request. A remembered non-auto chart
    /// preference substitutes for `Auto` before the charting handler's
    /// fixed policy sees the request.
    fn request(
        &self,
        handler: HandlerKind,
        intent: &Intent,
        count: Option<usize>,
        ctx: &DialogueContext,
    ) -> HandlerRequest {
        let chart_type = match intent.chart_type {
            ChartKind::Auto => ctx
                .chart_preferences()
                .chart_kind
                .unwrap_or(ChartKind::Auto),
            explicit => explicit,
        };

        HandlerRequest {
            handler,
            chart_type,
            data_focus: intent.data_focus,
            requested_count: count,
            referenced_entity: intent.referenced_entity.clone(),
            time_scope: intent.time_scope,
        }
    }

    fn fallback_answer(&self, dataset: &Dataset) -> Answer {
        let request = HandlerRequest {
            handler: HandlerKind::RejectionReasons,
            chart_type: ChartKind::Auto,
            data_focus: DataFocus::Auto,
            requested_count: Some(FALLBACK_COUNT),
            referenced_entity: None,
            time_scope: None,
        };
        defects::top_rejection_reasons(dataset, &request)
            .unwrap_or_else(|_| Answer::text(EMPTY_DATASET_TEXT))
    }
}

fn detect_superlative(folded: &str) -> Option<Superlative> {
    if folded.contains("highest") {
        Some(Superlative::Highest)
    } else if folded.contains("lowest") {
        Some(Superlative::Lowest)
    } else {
        None
    }
}
