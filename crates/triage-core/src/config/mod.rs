//! Triage vocabularies and tables.
//!
//! Every fixed list the engine consults (severity vocabulary, respiratory
//! indicators, condition categories, duration rules, canned replies) lives
//! here as data. [`TriageConfig::default`] carries the built-in tables; a TOML
//! file may override any section.
//!
//! ```toml
//! [severity]
//! emergency = ["chest pain", "stroke"]
//!
//! [[duration.units]]
//! unit = "weeks"
//! stem = "week"
//! threshold = 2
//! ```

mod defaults;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Top-level engine configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TriageConfig {
    pub severity: SeverityVocabulary,
    pub respiratory: RespiratoryIndicators,
    pub conditions: ConditionCategories,
    pub duration: DurationRules,
    pub dispatch: DispatchTables,
    pub render: RenderOptions,
    pub knowledge_base: KnowledgeBaseOptions,
}

/// Symptom phrases that override the severity tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeverityVocabulary {
    /// Checked first; any hit means emergency
    pub emergency: Vec<String>,
    /// Checked only when no emergency symptom matched
    pub urgent: Vec<String>,
}

/// Respiratory indicator groups used to exclude differential conditions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RespiratoryIndicators {
    pub mild: Vec<String>,
    pub severe: Vec<String>,
}

/// Disease-name categories for the related-condition finder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ConditionCategories {
    /// Suppressed for mild respiratory presentations
    pub chronic_respiratory: Vec<String>,
    /// Suppressed for severe respiratory presentations
    pub acute_infections: Vec<String>,
    /// Ranked ahead of everything else
    pub emergency: Vec<String>,
    /// Maximum number of related conditions returned
    pub max_related: usize,
}

/// Ordered duration units; the first unit found in a message is the only
/// one evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DurationRules {
    pub units: Vec<DurationUnit>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DurationUnit {
    /// Unit key used in the warning text ("days")
    pub unit: String,
    /// Singular stem matched in text, with an optional trailing "s" ("day")
    pub stem: String,
    /// Escalate when the count exceeds this; absent means always escalate
    #[serde(default)]
    pub threshold: Option<u32>,
}

/// Tables consulted by the response dispatcher.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DispatchTables {
    /// Word limit for the single-symptom shortcut
    pub shortcut_max_words: usize,
    /// Canned responses, in lookup order
    pub canned: Vec<CannedResponse>,
    /// Greeting and courtesy replies, in lookup order
    pub greetings: Vec<Greeting>,
    /// Words that trigger the generic "describe your symptoms" prompt
    pub health_keywords: Vec<String>,
    pub compound: CompoundRule,
    pub health_concern_reply: String,
    pub default_reply: String,
}

/// Fixed multi-step answer keyed by a single keyword.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CannedResponse {
    pub keyword: String,
    pub steps: Vec<String>,
    pub advice: String,
}

/// Courtesy reply. `{username}` in `reply` is replaced with the caller's name.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Greeting {
    pub keyword: String,
    pub reply: String,
}

/// Fires when every `required` phrase and at least one `any_of` phrase occur.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompoundRule {
    pub required: Vec<String>,
    pub any_of: Vec<String>,
    pub response: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RenderOptions {
    /// Append the related-condition line to diagnosis responses
    pub include_related: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct KnowledgeBaseOptions {
    /// Refuse to start unless the knowledge base hashes to this SHA-256
    pub expected_sha256: Option<String>,
}

impl TriageConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(path = %path.display(), "Loaded triage config");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ConfigResult<Self> {
        let config: TriageConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject tables that would make a dispatch step misfire.
    pub fn validate(&self) -> ConfigResult<()> {
        if let Some(entry) = self.dispatch.canned.iter().find(|c| c.keyword.trim().is_empty()) {
            return Err(ConfigError::Invalid(format!(
                "canned response with empty keyword (advice: {:?})",
                entry.advice
            )));
        }
        if self.dispatch.greetings.iter().any(|g| g.keyword.trim().is_empty()) {
            return Err(ConfigError::Invalid("greeting with empty keyword".into()));
        }
        if self.dispatch.health_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ConfigError::Invalid("empty health keyword".into()));
        }
        if self.duration.units.iter().any(|u| u.stem.trim().is_empty()) {
            return Err(ConfigError::Invalid("duration unit with empty stem".into()));
        }
        Ok(())
    }
}
