//! Symptom extraction by case-insensitive substring containment.

use crate::knowledge::KnowledgeBase;
use crate::models::SymptomSet;

/// Scans messages for symptom phrases known to the knowledge base.
pub struct SymptomExtractor {
    /// (lowercased phrase, display form) in knowledge-base order
    phrases: Vec<(String, String)>,
}

impl SymptomExtractor {
    /// Build the phrase list from every record's symptoms.
    pub fn new(kb: &KnowledgeBase) -> Self {
        let phrases = kb
            .symptom_vocabulary()
            .into_iter()
            // A blank phrase would be "contained" in every message
            .filter(|s| !s.trim().is_empty())
            .map(|s| (s.to_lowercase(), s.to_string()))
            .collect();
        Self { phrases }
    }

    /// Every known symptom phrase contained in `message`.
    ///
    /// No word-boundary check: "chest pain" and "pain" are both reported if
    /// both are known phrases.
    pub fn extract(&self, message: &str) -> SymptomSet {
        let lower = message.to_lowercase();
        self.phrases
            .iter()
            .filter(|(phrase, _)| lower.contains(phrase.as_str()))
            .map(|(_, display)| display.clone())
            .collect()
    }

    /// Number of distinct phrases the extractor looks for.
    pub fn vocabulary_size(&self) -> usize {
        self.phrases.len()
    }
}
