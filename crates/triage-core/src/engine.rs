//! Conversation engine.
//!
//! Owns the shared knowledge base, the matcher pipeline and the dispatcher.
//! Every turn is independent: no state carries over between messages.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::config::{ConfigResult, TriageConfig};
use crate::dispatch::{Dispatcher, Route};
use crate::knowledge::KnowledgeBase;
use crate::matcher::Matcher;
use crate::models::Diagnosis;
use crate::TriageError;

/// Reply to one conversational turn.
#[derive(Debug, Clone, Serialize)]
pub struct TriageReply {
    /// Correlates log lines for this turn
    pub turn_id: Uuid,
    pub route: Route,
    pub text: String,
    pub diagnosis: Option<Diagnosis>,
}

/// Stateless triage engine. Safe to share across threads.
pub struct TriageEngine {
    kb: Arc<KnowledgeBase>,
    matcher: Matcher,
    dispatcher: Dispatcher,
}

impl TriageEngine {
    pub fn new(kb: Arc<KnowledgeBase>, config: &TriageConfig) -> ConfigResult<Self> {
        Ok(Self {
            matcher: Matcher::new(Arc::clone(&kb), config)?,
            dispatcher: Dispatcher::new(config),
            kb,
        })
    }

    /// Engine over `kb` with the built-in tables.
    pub fn with_defaults(kb: KnowledgeBase) -> ConfigResult<Self> {
        Self::new(Arc::new(kb), &TriageConfig::default())
    }

    /// Load the knowledge base and optional TOML config from disk.
    ///
    /// When the config pins a knowledge-base fingerprint, a mismatching file
    /// is rejected.
    pub fn from_paths(
        knowledge_base: impl AsRef<Path>,
        config: Option<&Path>,
    ) -> Result<Self, TriageError> {
        let config = match config {
            Some(path) => TriageConfig::load(path)?,
            None => TriageConfig::default(),
        };
        let kb = KnowledgeBase::load_verified(
            knowledge_base,
            config.knowledge_base.expected_sha256.as_deref(),
        )?;
        Ok(Self::new(Arc::new(kb), &config)?)
    }

    /// Answer one message.
    pub fn respond(&self, message: &str, username: &str) -> TriageReply {
        let turn_id = Uuid::new_v4();
        let span = tracing::debug_span!("turn", %turn_id);
        let _guard = span.enter();

        let outcome = self.dispatcher.dispatch(&self.matcher, message, username);

        match &outcome.diagnosis {
            Some(diagnosis) => tracing::debug!(
                route = ?outcome.route,
                symptoms = diagnosis.symptoms.len(),
                disease = %diagnosis.disease(),
                severity = %diagnosis.severity,
                duration_escalated = diagnosis.duration.escalate,
                needs_escalation = diagnosis.needs_escalation(),
                "Turn dispatched"
            ),
            None => tracing::debug!(route = ?outcome.route, "Turn dispatched"),
        }

        TriageReply {
            turn_id,
            route: outcome.route,
            text: outcome.text,
            diagnosis: outcome.diagnosis,
        }
    }

    /// Reply text only.
    pub fn handle_message(&self, message: &str, username: &str) -> String {
        self.respond(message, username).text
    }

    /// Run the matcher directly, bypassing the dispatch chain.
    pub fn assess(&self, message: &str) -> Option<Diagnosis> {
        self.matcher.assess(message)
    }

    pub fn knowledge_base(&self) -> &KnowledgeBase {
        &self.kb
    }

    pub fn matcher(&self) -> &Matcher {
        &self.matcher
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
