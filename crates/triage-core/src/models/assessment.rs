//! Per-turn assessment models produced by the matcher pipeline.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Symptoms recognized in a single message.
///
/// Keyed case-insensitively; the display form is whichever spelling was
/// inserted first. Serializes as the sorted list of display forms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "Vec<String>", from = "Vec<String>")]
pub struct SymptomSet {
    /// lowercased key → display form
    entries: BTreeMap<String, String>,
}

impl SymptomSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symptom, keeping the existing display form on collision.
    ///
    /// Returns `true` if the symptom was not already present.
    pub fn insert(&mut self, symptom: impl Into<String>) -> bool {
        let display = symptom.into();
        match self.entries.entry(display.to_lowercase()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(display);
                true
            }
        }
    }

    pub fn contains(&self, symptom: &str) -> bool {
        self.entries.contains_key(&symptom.to_lowercase())
    }

    /// True if any of the given phrases is present.
    pub fn contains_any<S: AsRef<str>>(&self, symptoms: &[S]) -> bool {
        symptoms.iter().any(|s| self.contains(s.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lowercased keys, in key order.
    pub fn lowered(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Display forms sorted by display form (used for the diagnosis header).
    pub fn sorted_display(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.values().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<S: Into<String>> FromIterator<S> for SymptomSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SymptomSet::new();
        for symptom in iter {
            set.insert(symptom);
        }
        set
    }
}

impl From<Vec<String>> for SymptomSet {
    fn from(symptoms: Vec<String>) -> Self {
        symptoms.into_iter().collect()
    }
}

impl From<SymptomSet> for Vec<String> {
    fn from(set: SymptomSet) -> Self {
        set.sorted_display().into_iter().map(str::to_string).collect()
    }
}

/// Severity tier derived from the symptom vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeverityTier {
    Emergency,
    Urgent,
    Normal,
}

impl SeverityTier {
    /// Display color token for the tier.
    pub fn color(self) -> &'static str {
        match self {
            SeverityTier::Emergency => "#dc3545",
            SeverityTier::Urgent => "#ffc107",
            SeverityTier::Normal => "#28a745",
        }
    }

    /// Escalation message shown under the disease name.
    pub fn message(self) -> &'static str {
        match self {
            SeverityTier::Emergency => "⚠️ EMERGENCY: Seek immediate medical attention!",
            SeverityTier::Urgent => "⚠️ URGENT: Consult a healthcare provider soon!",
            SeverityTier::Normal => "Monitor your symptoms and follow the advice below.",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SeverityTier::Emergency => "emergency",
            SeverityTier::Urgent => "urgent",
            SeverityTier::Normal => "normal",
        }
    }
}

impl fmt::Display for SeverityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A duration phrase found in the message, e.g. "3 weeks".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationMention {
    pub count: u32,
    /// Unit key as configured ("days", "weeks", "months")
    pub unit: String,
}

/// Outcome of the duration scan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DurationCheck {
    pub escalate: bool,
    /// Empty unless `escalate` is set
    pub message: String,
    /// The mention that was evaluated, if any unit pattern matched
    pub mention: Option<DurationMention>,
}

impl DurationCheck {
    /// No duration phrase found.
    pub fn none() -> Self {
        Self::default()
    }

    /// Warning text, only when the duration escalates.
    pub fn warning(&self) -> Option<&str> {
        self.escalate.then_some(self.message.as_str())
    }
}

/// A knowledge-base record scored against the request's symptoms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseMatch {
    pub disease: String,
    pub treatment: Vec<String>,
    pub advice: String,
    /// Size of the symptom intersection
    pub match_count: usize,
    /// Number of symptoms listed on the record
    pub total_symptoms: usize,
}

/// A differential condition considered by the related-condition finder.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RelatedCandidate {
    pub disease: String,
    pub match_count: usize,
    pub is_emergency: bool,
}

impl RelatedCandidate {
    /// Ranking key, compared descending. Emergency status dominates overlap.
    pub fn rank_key(&self) -> (bool, usize) {
        (self.is_emergency, self.match_count)
    }
}

/// Full result of a symptom match.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnosis {
    /// Symptoms recognized in the message
    pub symptoms: SymptomSet,
    /// Highest-overlap record
    pub best_match: DiseaseMatch,
    pub severity: SeverityTier,
    pub duration: DurationCheck,
    /// Up to a few differential conditions, most urgent first
    pub related: Vec<String>,
}

impl Diagnosis {
    pub fn disease(&self) -> &str {
        &self.best_match.disease
    }

    /// True when either the symptoms or their duration call for a provider.
    pub fn needs_escalation(&self) -> bool {
        self.severity != SeverityTier::Normal || self.duration.escalate
    }
}
