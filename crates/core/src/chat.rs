//! The one-turn reply pipeline shared by every front-end.
//!
//! A turn is a pure function of the input text and the shared [`KnowledgeBase`]: classify the
//! intent, resolve a disease, compose the reply. Nothing is remembered between turns.

use crate::catalog::DiseaseRecord;
use crate::composer::{Reply, ReplyFormat, ResponseComposer, ResponseStrategy};
use crate::config::CoreConfig;
use crate::constants::EMPTY_MESSAGE_WARNING;
use crate::error::CatalogResult;
use crate::knowledge::KnowledgeBase;
use crate::resolver::DiseaseResolver;
use std::sync::Arc;

/// Rendering and resolution switches applied to every turn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplyOptions {
    pub format: ReplyFormat,
    pub strategy: ResponseStrategy,
    pub symptom_matching: bool,
}

impl ReplyOptions {
    pub fn from_config(cfg: &CoreConfig) -> Self {
        Self {
            format: cfg.reply_format(),
            strategy: cfg.response_strategy(),
            symptom_matching: cfg.symptom_matching(),
        }
    }
}

/// Answers messages from a shared, read-only knowledge base.
///
/// Cloning is cheap; clones share the same catalogs.
#[derive(Debug, Clone)]
pub struct ChatService {
    knowledge: Arc<KnowledgeBase>,
    options: ReplyOptions,
}

impl ChatService {
    pub fn new(knowledge: Arc<KnowledgeBase>, options: ReplyOptions) -> Self {
        Self { knowledge, options }
    }

    /// Load and validate the catalogs named by `cfg`.
    pub fn from_config(cfg: &CoreConfig) -> CatalogResult<Self> {
        let knowledge = KnowledgeBase::load(cfg)?;
        Ok(Self::new(Arc::new(knowledge), ReplyOptions::from_config(cfg)))
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn options(&self) -> ReplyOptions {
        self.options
    }

    pub fn classify(&self, text: &str) -> &str {
        self.knowledge.classifier().classify(text)
    }

    pub fn resolver(&self) -> DiseaseResolver<'_> {
        DiseaseResolver::new(self.knowledge.diseases(), self.knowledge.aliases())
            .with_symptom_matching(self.options.symptom_matching)
    }

    pub fn resolve(&self, text: &str) -> Option<&DiseaseRecord> {
        self.resolver().resolve(text)
    }

    /// Answer one turn.
    pub fn reply(&self, text: &str) -> Reply {
        let tag = self.classify(text);
        let resolved = self.resolver().resolve_with_tier(text);
        tracing::debug!(
            tag,
            disease = ?resolved.map(|(r, _)| r.name.as_str()),
            tier = ?resolved.map(|(_, t)| t),
            "classified turn"
        );

        ResponseComposer::new(
            self.knowledge.intents(),
            self.options.format,
            self.options.strategy,
        )
        .compose(tag, resolved.map(|(record, _)| record))
    }

    /// Answer a message arriving over the HTTP boundary.
    ///
    /// Blank messages get a fixed warning and never reach the classifier or resolver.
    pub fn reply_to_message(&self, message: &str) -> String {
        let message = message.trim();
        if message.is_empty() {
            return EMPTY_MESSAGE_WARNING.to_string();
        }
        self.reply(message).text
    }
}
