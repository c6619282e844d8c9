//! Differential (related) condition lookup.
//!
//! Exclusion rules:
//! - mild respiratory presentation without severe indicators: skip chronic
//!   respiratory conditions
//! - any severe respiratory indicator: skip acute infections
//!
//! Survivors are ranked by (emergency, overlap) descending.

use crate::config::{ConditionCategories, RespiratoryIndicators};
use crate::knowledge::KnowledgeBase;
use crate::models::{RelatedCandidate, SymptomSet};

/// Finds alternate diagnoses that share symptoms with the request.
pub struct RelatedConditionFinder {
    mild: Vec<String>,
    severe: Vec<String>,
    chronic_respiratory: Vec<String>,
    acute_infections: Vec<String>,
    emergency: Vec<String>,
    max_related: usize,
}

impl RelatedConditionFinder {
    pub fn new(indicators: &RespiratoryIndicators, categories: &ConditionCategories) -> Self {
        Self {
            mild: indicators.mild.iter().map(|s| s.to_lowercase()).collect(),
            severe: indicators.severe.iter().map(|s| s.to_lowercase()).collect(),
            chronic_respiratory: categories.chronic_respiratory.clone(),
            acute_infections: categories.acute_infections.clone(),
            emergency: categories.emergency.clone(),
            max_related: categories.max_related,
        }
    }

    /// All qualifying candidates other than `exclude`, best first.
    pub fn candidates(
        &self,
        kb: &KnowledgeBase,
        symptoms: &SymptomSet,
        exclude: &str,
    ) -> Vec<RelatedCandidate> {
        let has_mild = symptoms.contains_any(&self.mild);
        let has_severe = symptoms.contains_any(&self.severe);

        let mut related: Vec<RelatedCandidate> = kb
            .records()
            .iter()
            .filter(|record| record.has_symptoms() && !record.is_named(exclude))
            .filter(|record| {
                let disease = &record.disease;
                let chronic_for_mild = has_mild && !has_severe && self.chronic_respiratory.contains(disease);
                let acute_for_severe = has_severe && self.acute_infections.contains(disease);
                !chronic_for_mild && !acute_for_severe
            })
            .filter_map(|record| {
                let match_count = record.symptom_overlap(symptoms);
                (match_count > 0).then(|| RelatedCandidate {
                    disease: record.disease.clone(),
                    match_count,
                    is_emergency: self.emergency.contains(&record.disease),
                })
            })
            .collect();

        // Stable: ties stay in knowledge-base order
        related.sort_by(|a, b| b.rank_key().cmp(&a.rank_key()));
        related
    }

    /// Names of the top related conditions, at most `max_related`.
    pub fn find(&self, kb: &KnowledgeBase, symptoms: &SymptomSet, exclude: &str) -> Vec<String> {
        self.candidates(kb, symptoms, exclude)
            .into_iter()
            .take(self.max_related)
            .map(|c| c.disease)
            .collect()
    }
}

impl Default for RelatedConditionFinder {
    fn default() -> Self {
        Self::new(&RespiratoryIndicators::default(), &ConditionCategories::default())
    }
}
