//! Symptom matcher pipeline.
//!
//! Pipeline: Extraction → {Severity, Duration, Diagnosis → Related}

mod diagnosis;
mod duration;
mod extractor;
mod related;
mod severity;

pub use diagnosis::*;
pub use duration::*;
pub use extractor::*;
pub use related::*;
pub use severity::*;

use std::sync::Arc;

use crate::config::{ConfigResult, TriageConfig};
use crate::knowledge::KnowledgeBase;
use crate::models::{Diagnosis, SymptomSet};

/// Coordinates the full matching pipeline over a shared knowledge base.
pub struct Matcher {
    kb: Arc<KnowledgeBase>,
    extractor: SymptomExtractor,
    severity: SeverityClassifier,
    duration: DurationDetector,
    related: RelatedConditionFinder,
}

impl Matcher {
    /// Create a matcher. Fails only if a duration pattern cannot compile.
    pub fn new(kb: Arc<KnowledgeBase>, config: &TriageConfig) -> ConfigResult<Self> {
        Ok(Self {
            extractor: SymptomExtractor::new(&kb),
            severity: SeverityClassifier::new(&config.severity),
            duration: DurationDetector::new(&config.duration)?,
            related: RelatedConditionFinder::new(&config.respiratory, &config.conditions),
            kb,
        })
    }

    /// Symptoms mentioned in `message`.
    pub fn extract(&self, message: &str) -> SymptomSet {
        self.extractor.extract(message)
    }

    /// Extract symptoms from `message` and diagnose them.
    ///
    /// Returns `None` when no symptom is recognized or nothing overlaps.
    pub fn assess(&self, message: &str) -> Option<Diagnosis> {
        let symptoms = self.extract(message);
        self.diagnose(symptoms, message)
    }

    /// Diagnose an already-extracted symptom set. `message` is only scanned
    /// for duration phrases.
    pub fn diagnose(&self, symptoms: SymptomSet, message: &str) -> Option<Diagnosis> {
        if symptoms.is_empty() {
            return None;
        }

        let best_match = DiagnosisMatcher::new(&self.kb).best_match(&symptoms)?;
        let severity = self.severity.classify(&symptoms);
        let duration = self.duration.check(message);
        let related = self.related.find(&self.kb, &symptoms, &best_match.disease);

        Some(Diagnosis {
            symptoms,
            best_match,
            severity,
            duration,
            related,
        })
    }

    pub fn extractor(&self) -> &SymptomExtractor {
        &self.extractor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SeverityTier;

    fn setup_matcher() -> Matcher {
        let kb = KnowledgeBase::from_json_str(
            r#"[
                {"disease": "Heart Attack", "symptoms": ["chest pain", "shortness of breath", "nausea"],
                 "treatment": ["Call emergency services"], "advice": "Do not wait."},
                {"disease": "Flu", "symptoms": ["fever", "cough", "fatigue"],
                 "treatment": ["Rest", "Fluids"], "advice": "Stay home."},
                {"disease": "Pneumonia", "symptoms": ["fever", "cough", "chest pain"],
                 "treatment": ["Antibiotics"], "advice": "See a doctor."}
            ]"#,
        )
        .unwrap();
        Matcher::new(Arc::new(kb), &TriageConfig::default()).unwrap()
    }

    #[test]
    fn test_assess_full_pipeline() {
        let matcher = setup_matcher();

        let diagnosis = matcher.assess("fever and chest pain for 2 months").unwrap();

        assert_eq!(diagnosis.symptoms.sorted_display(), vec!["chest pain", "fever"]);
        assert_eq!(diagnosis.disease(), "Pneumonia");
        assert_eq!(diagnosis.severity, SeverityTier::Emergency);
        assert!(diagnosis.duration.escalate);
        // Flu is an acute infection, suppressed for a severe presentation
        assert_eq!(diagnosis.related, vec!["Heart Attack"]);
    }

    #[test]
    fn test_assess_without_symptoms() {
        let matcher = setup_matcher();
        assert!(matcher.assess("hello there").is_none());
    }

    #[test]
    fn test_diagnose_empty_set() {
        let matcher = setup_matcher();
        assert!(matcher.diagnose(SymptomSet::new(), "for 3 months").is_none());
    }

    #[test]
    fn test_related_never_contains_best_match() {
        let matcher = setup_matcher();

        let diagnosis = matcher.assess("cough and fatigue").unwrap();
        assert_eq!(diagnosis.disease(), "Flu");
        assert!(!diagnosis.related.iter().any(|d| d == diagnosis.disease()));
    }
}
