//! Short-term conversational memory and follow-up reference resolution.
//!
//! [`DialogueContext`] holds exactly one previous turn (question and answer
//! text), the entity currently under discussion, an append-once list of
//! every entity mentioned so far, and soft chart preferences. The
//! [`ReferenceResolver`] ties context-dependent follow-ups ("why does this
//! part fail?") back to an entity from that state.

pub mod resolver;
pub mod store;

pub use resolver::{ReferenceResolver, Resolution};
pub use store::{ChartPreferences, DialogueContext};
