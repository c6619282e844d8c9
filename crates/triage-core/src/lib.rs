//! Symptom Triage Core Library
//!
//! Rule-based symptom triage: free-text message in, markup reply out.
//!
//! # Architecture
//!
//! ```text
//!                         Message
//!                            │
//!                   ┌────────▼────────┐
//!                   │   Dispatcher    │  first route that answers wins
//!                   └────────┬────────┘
//!                            │
//!        ┌───────────────────┼─────────────────────────┐
//!        │                   │                         │
//!        ▼                   ▼                         ▼
//!  Canned shortcut     Matcher pipeline         Greeting / canned /
//!                            │                  compound / fallback
//!              ┌─────────────┼──────────────┐
//!              ▼             ▼              ▼
//!          Severity      Duration       Diagnosis ──► Related
//!                            │
//!                     ┌──────▼──────┐
//!                     │   Render    │
//!                     └─────────────┘
//! ```
//!
//! # Core Principle
//!
//! **Every reply is deterministic.** The same message and knowledge base
//! always produce the same route and text; ties resolve by knowledge-base
//! order.
//!
//! # Modules
//!
//! - [`knowledge`]: JSON knowledge base loader with SHA-256 fingerprint
//! - [`models`]: Domain types (DiseaseRecord, SymptomSet, Diagnosis, etc.)
//! - [`matcher`]: Extraction, severity, duration, diagnosis and related conditions
//! - [`dispatch`]: Ordered response chain
//! - [`render`]: Reply markup
//! - [`config`]: TOML-overridable vocabularies and tables
//! - [`engine`]: Per-turn entry point

pub mod config;
pub mod dispatch;
pub mod engine;
pub mod knowledge;
pub mod matcher;
pub mod models;
pub mod render;

// Re-export commonly used types
pub use config::{ConfigError, TriageConfig};
pub use dispatch::{DispatchOutcome, Dispatcher, Route};
pub use engine::{TriageEngine, TriageReply};
pub use knowledge::{KnowledgeBase, KnowledgeError};
pub use matcher::Matcher;
pub use models::{
    Diagnosis, DiseaseMatch, DiseaseRecord, DurationCheck, SeverityTier, SymptomSet,
};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::path::Path;
use std::sync::Arc;

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum TriageError {
    #[error("Knowledge base error: {0}")]
    KnowledgeBase(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<KnowledgeError> for TriageError {
    fn from(e: KnowledgeError) -> Self {
        TriageError::KnowledgeBase(e.to_string())
    }
}

impl From<ConfigError> for TriageError {
    fn from(e: ConfigError) -> Self {
        TriageError::Config(e.to_string())
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Open an engine over the knowledge base at `knowledge_base_path` with the
/// built-in tables.
#[uniffi::export]
pub fn open_engine(knowledge_base_path: String) -> Result<Arc<TriageCore>, TriageError> {
    let engine = TriageEngine::from_paths(&knowledge_base_path, None)?;
    Ok(Arc::new(TriageCore { engine }))
}

/// Open an engine with a TOML config overriding the built-in tables.
#[uniffi::export]
pub fn open_engine_with_config(
    knowledge_base_path: String,
    config_path: String,
) -> Result<Arc<TriageCore>, TriageError> {
    let engine = TriageEngine::from_paths(&knowledge_base_path, Some(Path::new(&config_path)))?;
    Ok(Arc::new(TriageCore { engine }))
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe engine wrapper for FFI. The engine is immutable, so no lock.
#[derive(uniffi::Object)]
pub struct TriageCore {
    engine: TriageEngine,
}

#[uniffi::export]
impl TriageCore {
    /// Reply markup for one chat message.
    pub fn handle_message(&self, message: String, username: String) -> String {
        self.engine.handle_message(&message, &username)
    }

    /// Structured diagnosis, or `None` when no symptom is recognized.
    pub fn assess(&self, message: String) -> Option<FfiDiagnosis> {
        self.engine.assess(&message).map(Into::into)
    }

    /// SHA-256 of the loaded knowledge base.
    pub fn knowledge_base_fingerprint(&self) -> String {
        self.engine.knowledge_base().fingerprint().to_string()
    }
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe diagnosis.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiDiagnosis {
    pub symptoms: Vec<String>,
    pub disease: String,
    pub severity: String,
    pub severity_color: String,
    pub severity_message: String,
    pub duration_warning: Option<String>,
    /// Severity or duration calls for a healthcare provider
    pub needs_escalation: bool,
    pub treatment: Vec<String>,
    pub advice: String,
    pub related: Vec<String>,
}

impl From<Diagnosis> for FfiDiagnosis {
    fn from(diagnosis: Diagnosis) -> Self {
        Self {
            duration_warning: diagnosis.duration.warning().map(str::to_string),
            needs_escalation: diagnosis.needs_escalation(),
            severity: diagnosis.severity.as_str().to_string(),
            severity_color: diagnosis.severity.color().to_string(),
            severity_message: diagnosis.severity.message().to_string(),
            symptoms: diagnosis.symptoms.into(),
            disease: diagnosis.best_match.disease,
            treatment: diagnosis.best_match.treatment,
            advice: diagnosis.best_match.advice,
            related: diagnosis.related,
        }
    }
}
