//! The conversation engine.
//!
//! One engine serves one conversation session: it owns the dataset handle,
//! the pipeline stages, and the session's dialogue context. Turns are
//! strictly sequential; the context lock is taken once per turn, which
//! lets callers share an engine behind `Arc` without violating the
//! single-writer rule. Separate sessions need separate engines; context is
//! never shared.

use log::debug;

use parking_lot::Mutex;

use crate::analysis::FeatureExtractor;
use crate::context::{DialogueContext, ReferenceResolver, Resolution};
use crate::dataset::Dataset;
use crate::handlers::Answer;
use crate::intent::{Intent, IntentClassifier};
use crate::router::IntentRouter;

/// A question-answering session over one dataset.
///
/// `ask` never fails: classification degrades to explicit fallbacks,
/// unresolved references become clarification requests, and handler
/// errors are replaced with the general summary at the router boundary.
pub struct ConversationEngine {
    dataset: Dataset,
    extractor: FeatureExtractor,
    classifier: IntentClassifier,
    resolver: ReferenceResolver,
    router: IntentRouter,
    context: Mutex<DialogueContext>,
}

impl ConversationEngine {
    /// Create an engine with a fresh dialogue context.
    pub fn new(dataset: Dataset) -> Self {
        ConversationEngine {
            dataset,
            extractor: FeatureExtractor::new(),
            classifier: IntentClassifier::new(),
            resolver: ReferenceResolver::new(),
            router: IntentRouter::new(),
            context: Mutex::new(DialogueContext::new()),
        }
    }

    /// Answer one question.
    ///
    /// Pipeline: extract features, classify the intent, attempt reference
    /// resolution (which short-circuits routing when it applies), then
    /// dispatch. The turn is recorded into the dialogue context on every
    /// path, including degraded ones.
    pub fn ask(&self, question: &str) -> Answer {
        let features = self.extractor.extract(question);
        let mut intent = self.classifier.classify(&features, question);
        let mut ctx = self.context.lock();

        match self.resolver.resolve(&features, &ctx) {
            Resolution::Resolved(entity) => {
                debug!("turn resolved to entity {entity}");
                ctx.set_current_entity(&entity);
                intent.referenced_entity = Some(entity.clone());
                self.router
                    .route_reference(&entity, &intent, question, &self.dataset, &mut ctx)
            }
            Resolution::Unresolved => self.router.route_unresolved(&intent, question, &mut ctx),
            Resolution::NotContextual => {
                if let Some(entity) = &intent.referenced_entity {
                    ctx.mention(entity);
                }
                self.router.route(&intent, question, &self.dataset, &mut ctx)
            }
        }
    }

    /// Classify a question without answering it or touching the context.
    pub fn analyze(&self, question: &str) -> Intent {
        let features = self.extractor.extract(question);
        self.classifier.classify(&features, question)
    }

    /// A snapshot of the session's dialogue context.
    pub fn context_snapshot(&self) -> DialogueContext {
        self.context.lock().clone()
    }

    /// The dataset this session answers over.
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }
}
