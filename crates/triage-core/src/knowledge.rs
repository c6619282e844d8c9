//! Disease knowledge base.
//!
//! Loaded once at startup from a JSON file and never mutated afterwards. The
//! file is either `{"training_data": [...]}` or a bare array of records.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use sha2::{Digest, Sha256};
use strsim::jaro_winkler;
use thiserror::Error;

use crate::models::DiseaseRecord;

/// Names at least this similar (Jaro-Winkler, lowercased) are reported as
/// probable duplicates.
const NEAR_DUPLICATE_SIMILARITY: f64 = 0.97;

/// Knowledge base errors.
#[derive(Error, Debug)]
pub enum KnowledgeError {
    #[error("Failed to read knowledge base {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed knowledge base: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Knowledge base contains no records")]
    Empty,

    #[error("Invalid record at index {index}: {reason}")]
    InvalidRecord { index: usize, reason: String },

    #[error("Knowledge base fingerprint mismatch: expected {expected}, got {actual}")]
    FingerprintMismatch { expected: String, actual: String },
}

pub type KnowledgeResult<T> = Result<T, KnowledgeError>;

/// `{"training_data": [...]}` as written by the data pipeline.
#[derive(Deserialize)]
struct KnowledgeFile {
    training_data: Vec<DiseaseRecord>,
}

/// Read-only collection of disease records.
#[derive(Debug, Clone)]
pub struct KnowledgeBase {
    records: Vec<DiseaseRecord>,
    fingerprint: String,
}

impl KnowledgeBase {
    /// Load the knowledge base from a JSON file.
    pub fn load<P: AsRef<Path>>(path: P) -> KnowledgeResult<Self> {
        Self::load_verified(path, None)
    }

    /// Load the knowledge base, refusing it unless its SHA-256 matches
    /// `expected_sha256` (when given).
    pub fn load_verified<P: AsRef<Path>>(
        path: P,
        expected_sha256: Option<&str>,
    ) -> KnowledgeResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| KnowledgeError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let kb = Self::from_slice(&bytes)?;

        if let Some(expected) = expected_sha256 {
            if !expected.trim().eq_ignore_ascii_case(&kb.fingerprint) {
                return Err(KnowledgeError::FingerprintMismatch {
                    expected: expected.trim().to_string(),
                    actual: kb.fingerprint,
                });
            }
        }

        tracing::info!(
            path = %path.display(),
            records = kb.len(),
            fingerprint = %kb.fingerprint,
            "Loaded knowledge base"
        );
        Ok(kb)
    }

    /// Parse a knowledge base from raw JSON bytes.
    ///
    /// The top-level shape is picked from the first token so serde reports
    /// the failing record's position and field.
    pub fn from_slice(bytes: &[u8]) -> KnowledgeResult<Self> {
        let records = match bytes.iter().find(|b| !b.is_ascii_whitespace()) {
            Some(b'[') => serde_json::from_slice::<Vec<DiseaseRecord>>(bytes)?,
            _ => serde_json::from_slice::<KnowledgeFile>(bytes)?.training_data,
        };
        Self::build(records, hash_data(bytes))
    }

    pub fn from_json_str(text: &str) -> KnowledgeResult<Self> {
        Self::from_slice(text.as_bytes())
    }

    fn build(records: Vec<DiseaseRecord>, fingerprint: String) -> KnowledgeResult<Self> {
        if records.is_empty() {
            return Err(KnowledgeError::Empty);
        }
        if let Some(index) = records.iter().position(|r| r.disease.trim().is_empty()) {
            return Err(KnowledgeError::InvalidRecord {
                index,
                reason: "disease name is blank".into(),
            });
        }

        let kb = Self { records, fingerprint };
        for (first, second) in kb.duplicate_names() {
            tracing::warn!(first, second, "Knowledge base has near-duplicate disease names");
        }
        Ok(kb)
    }

    pub fn records(&self) -> &[DiseaseRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// SHA-256 (hex) of the source the knowledge base was built from.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// First record with exactly this disease name.
    pub fn find(&self, disease: &str) -> Option<&DiseaseRecord> {
        self.records.iter().find(|r| r.is_named(disease))
    }

    /// Every distinct symptom phrase, first-seen spelling, in record order.
    pub fn symptom_vocabulary(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.records
            .iter()
            .flat_map(|r| r.symptoms.iter())
            .filter(|symptom| seen.insert(symptom.to_lowercase()))
            .map(String::as_str)
            .collect()
    }

    /// Pairs of disease names that are identical or nearly so, ignoring case.
    pub fn duplicate_names(&self) -> Vec<(&str, &str)> {
        let mut pairs = Vec::new();
        for (i, a) in self.records.iter().enumerate() {
            let a_lower = a.disease.to_lowercase();
            for b in &self.records[i + 1..] {
                let b_lower = b.disease.to_lowercase();
                if jaro_winkler(&a_lower, &b_lower) >= NEAR_DUPLICATE_SIMILARITY {
                    pairs.push((a.disease.as_str(), b.disease.as_str()));
                }
            }
        }
        pairs
    }
}

/// Hex-encoded SHA-256 of `data`.
pub fn hash_data(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}
