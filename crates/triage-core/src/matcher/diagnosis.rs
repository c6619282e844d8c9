//! Diagnosis ranking by symptom overlap.
//!
//! Every record with symptoms is scored by the size of its intersection with
//! the request's symptoms. Records with no overlap are dropped. Ranking is by
//! overlap only; equal scores keep knowledge-base order.

use crate::knowledge::KnowledgeBase;
use crate::models::{DiseaseMatch, DiseaseRecord, SymptomSet};

/// Scores knowledge-base records against a symptom set.
pub struct DiagnosisMatcher<'a> {
    kb: &'a KnowledgeBase,
}

impl<'a> DiagnosisMatcher<'a> {
    pub fn new(kb: &'a KnowledgeBase) -> Self {
        Self { kb }
    }

    /// All overlapping records, best first.
    pub fn rank(&self, symptoms: &SymptomSet) -> Vec<DiseaseMatch> {
        if symptoms.is_empty() {
            return Vec::new();
        }

        let mut matches: Vec<DiseaseMatch> = self
            .kb
            .records()
            .iter()
            .filter(|record| record.has_symptoms())
            .filter_map(|record| score_record(record, symptoms))
            .collect();

        // Stable: ties stay in knowledge-base order
        matches.sort_by(|a, b| b.match_count.cmp(&a.match_count));
        matches
    }

    /// The single highest-overlap record, if any record overlaps at all.
    pub fn best_match(&self, symptoms: &SymptomSet) -> Option<DiseaseMatch> {
        self.rank(symptoms).into_iter().next()
    }
}

fn score_record(record: &DiseaseRecord, symptoms: &SymptomSet) -> Option<DiseaseMatch> {
    let match_count = record.symptom_overlap(symptoms);
    if match_count == 0 {
        return None;
    }
    Some(DiseaseMatch {
        disease: record.disease.clone(),
        treatment: record.treatment.clone(),
        advice: record.advice.clone(),
        match_count,
        total_symptoms: record.symptoms.len(),
    })
}
