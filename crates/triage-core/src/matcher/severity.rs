//! Severity tier classification.

use crate::config::SeverityVocabulary;
use crate::models::{SeverityTier, SymptomSet};

/// Maps a symptom set to a severity tier.
///
/// The emergency vocabulary is checked first and wins outright; the urgent
/// vocabulary is consulted only when no emergency symptom is present.
pub struct SeverityClassifier {
    emergency: Vec<String>,
    urgent: Vec<String>,
}

impl SeverityClassifier {
    pub fn new(vocabulary: &SeverityVocabulary) -> Self {
        Self {
            emergency: vocabulary.emergency.iter().map(|s| s.to_lowercase()).collect(),
            urgent: vocabulary.urgent.iter().map(|s| s.to_lowercase()).collect(),
        }
    }

    pub fn classify(&self, symptoms: &SymptomSet) -> SeverityTier {
        if symptoms.contains_any(&self.emergency) {
            SeverityTier::Emergency
        } else if symptoms.contains_any(&self.urgent) {
            SeverityTier::Urgent
        } else {
            SeverityTier::Normal
        }
    }
}

impl Default for SeverityClassifier {
    fn default() -> Self {
        Self::new(&SeverityVocabulary::default())
    }
}
