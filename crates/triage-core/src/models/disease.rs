//! Knowledge-base disease records.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::SymptomSet;

/// A single condition in the triage knowledge base.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseRecord {
    /// Display name, also used as the lookup key for related conditions
    pub disease: String,
    /// Symptom phrases in canonical display case
    #[serde(default)]
    pub symptoms: Vec<String>,
    /// Treatment steps, rendered as a bulleted list
    #[serde(default)]
    pub treatment: Vec<String>,
    /// Free-text advice shown after the treatment list
    #[serde(default)]
    pub advice: String,
}

impl DiseaseRecord {
    /// Create a new record with only a disease name.
    pub fn new(disease: impl Into<String>) -> Self {
        Self {
            disease: disease.into(),
            symptoms: Vec::new(),
            treatment: Vec::new(),
            advice: String::new(),
        }
    }

    /// Records without symptoms never take part in matching.
    pub fn has_symptoms(&self) -> bool {
        !self.symptoms.is_empty()
    }

    /// Number of distinct symptoms shared with the request (case-insensitive).
    pub fn symptom_overlap(&self, symptoms: &SymptomSet) -> usize {
        let mut seen = HashSet::with_capacity(self.symptoms.len());
        self.symptoms
            .iter()
            .map(|s| s.to_lowercase())
            .filter(|lower| symptoms.contains(lower) && seen.insert(lower.clone()))
            .count()
    }

    /// Exact name comparison, as used for category membership.
    pub fn is_named(&self, name: &str) -> bool {
        self.disease == name
    }
}
