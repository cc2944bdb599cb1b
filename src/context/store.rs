//! The dialogue context store.

use serde::{Deserialize, Serialize};

use crate::intent::{ChartKind, DataFocus, Intent};

/// Soft defaults remembered from earlier turns: the last chart kind and
/// data focus the user asked for explicitly (never `Auto`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChartPreferences {
    /// Last explicitly requested chart kind.
    pub chart_kind: Option<ChartKind>,
    /// Last explicitly requested data focus.
    pub data_focus: Option<DataFocus>,
}

/// Per-session conversational state.
///
/// Single-writer, last-write-wins: exactly one turn is in flight at a time
/// and every answered turn calls [`record`](DialogueContext::record),
/// including turns that degraded to a fallback or clarification answer.
/// Only the immediately previous turn's question and answer are kept.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DialogueContext {
    last_question: String,
    last_answer: String,
    current_focus_entity: Option<String>,
    mentioned_entities: Vec<String>,
    chart_preferences: ChartPreferences,
}

impl DialogueContext {
    /// Create an empty context for a fresh session.
    pub fn new() -> Self {
        DialogueContext::default()
    }

    /// Record an answered turn. Overwrites the previous turn and refreshes
    /// chart preferences from any explicit (non-auto) axis values.
    pub fn record(&mut self, question: &str, answer: &str, intent: &Intent) {
        self.last_question = question.to_string();
        self.last_answer = answer.to_string();

        if intent.chart_type != ChartKind::Auto {
            self.chart_preferences.chart_kind = Some(intent.chart_type);
        }
        if intent.data_focus != DataFocus::Auto {
            self.chart_preferences.data_focus = Some(intent.data_focus);
        }
    }

    /// Make `entity` the entity currently under discussion and remember
    /// the mention.
    pub fn set_current_entity<S: Into<String>>(&mut self, entity: S) {
        let entity = entity.into();
        self.mention(&entity);
        self.current_focus_entity = Some(entity);
    }

    /// Append an entity to the mention list unless it is already present.
    /// An existing entry keeps its first-seen position.
    pub fn mention(&mut self, entity: &str) {
        if !self.mentioned_entities.iter().any(|e| e == entity) {
            self.mentioned_entities.push(entity.to_string());
        }
    }

    /// The previous turn's question, or empty before the first turn.
    pub fn last_question(&self) -> &str {
        &self.last_question
    }

    /// The previous turn's answer text, or empty before the first turn.
    pub fn last_answer(&self) -> &str {
        &self.last_answer
    }

    /// True once at least one turn has been answered.
    pub fn has_history(&self) -> bool {
        !self.last_answer.is_empty()
    }

    /// The entity currently under discussion, if any.
    pub fn current_focus_entity(&self) -> Option<&str> {
        self.current_focus_entity.as_deref()
    }

    /// Every entity mentioned so far, in first-seen order.
    pub fn mentioned_entities(&self) -> &[String] {
        &self.mentioned_entities
    }

    /// Remembered chart preferences.
    pub fn chart_preferences(&self) -> &ChartPreferences {
        &self.chart_preferences
    }
}
