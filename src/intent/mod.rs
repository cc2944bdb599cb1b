//! Intent classification for free-text questions.
//!
//! The classifier maps [`ExtractedFeatures`](crate::analysis::ExtractedFeatures)
//! onto one [`Intent`]: a question type, a data focus, a chart kind, the
//! requested result count, a time scope, and any entity the question names.
//! Classification is deterministic and never fails; a question that matches
//! nothing resolves to explicit `Auto`/`General` labels which the router
//! must handle.

pub mod classifier;
pub mod types;

pub use classifier::IntentClassifier;
pub use types::{ChartKind, DataFocus, Intent, QuestionType, TimeScope};
