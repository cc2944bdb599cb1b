//! # Inquest
//!
//! A conversational question-answering engine for tabular quality-inspection
//! data (daily rejection counts per part, broken down by defect category).
//!
//! ## Features
//!
//! - Deterministic, rule-based question understanding (no ML)
//! - Additive keyword/phrase scoring over a declarative vocabulary table
//! - Short-term dialogue memory with follow-up reference resolution
//! - Ordered precedence routing to aggregation and chart handlers
//! - Structured chart artifacts (kind, title, series) for callers to render
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use inquest::dataset::{Dataset, InspectionRecord};
//! use inquest::engine::ConversationEngine;
//!
//! let dataset = Dataset::from_records(
//!     vec!["Burr".to_string(), "Damage".to_string()],
//!     vec![InspectionRecord {
//!         date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
//!         part: "PART-1001".to_string(),
//!         inspected_qty: 500,
//!         total_rejected: 40,
//!         defect_counts: vec![30, 10],
//!     }],
//! )
//! .unwrap();
//!
//! let engine = ConversationEngine::new(dataset);
//! let answer = engine.ask("top 5 rejection reasons");
//! assert!(!answer.text.is_empty());
//! ```

pub mod analysis;
pub mod context;
pub mod dataset;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod intent;
pub mod router;
pub mod util;

pub mod prelude {
    //! Convenience re-exports for common usage.

    pub use crate::analysis::FeatureExtractor;
    pub use crate::context::{DialogueContext, ReferenceResolver, Resolution};
    pub use crate::dataset::{Dataset, InspectionRecord};
    pub use crate::engine::ConversationEngine;
    pub use crate::error::{EngineError, Result};
    pub use crate::handlers::{Answer, ChartArtifact};
    pub use crate::intent::{ChartKind, DataFocus, Intent, IntentClassifier, QuestionType};
    pub use crate::router::IntentRouter;
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
