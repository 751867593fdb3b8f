//! Name, unit and status normalization against the reference catalog.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::ReferenceCatalog;
use crate::model::{CandidateTest, NormalizedTest, TestStatus};

/// Confidence reported for every non-empty normalized batch.
///
/// The batch path does not aggregate the per-test score from
/// [`test_confidence`]; both are kept as-is.
pub const BATCH_NORMALIZATION_CONFIDENCE: f64 = 0.84;

/// Normalized batch with its confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizationResult {
    pub tests: Vec<NormalizedTest>,
    pub normalization_confidence: f64,
}

/// One normalized test with its own confidence score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SingleNormalization {
    pub test: NormalizedTest,
    pub confidence: f64,
}

/// Maps candidate tests onto the catalog.
#[derive(Debug, Clone)]
pub struct Normalizer {
    catalog: Arc<ReferenceCatalog>,
}

impl Normalizer {
    /// Create a normalizer over the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(ReferenceCatalog::shared())
    }

    pub fn with_catalog(catalog: Arc<ReferenceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &ReferenceCatalog {
        &self.catalog
    }

    /// Normalize a batch of (already deduplicated) candidates.
    pub fn normalize(&self, candidates: &[CandidateTest]) -> NormalizationResult {
        let tests: Vec<NormalizedTest> = candidates.iter().map(|c| self.normalize_test(c)).collect();
        let normalization_confidence = if tests.is_empty() {
            0.0
        } else {
            BATCH_NORMALIZATION_CONFIDENCE
        };

        NormalizationResult {
            tests,
            normalization_confidence,
        }
    }

    /// Normalize one candidate and score it individually.
    pub fn normalize_single(&self, candidate: &CandidateTest) -> SingleNormalization {
        let test = self.normalize_test(candidate);
        let confidence = test_confidence(&test);
        SingleNormalization { test, confidence }
    }

    /// Canonical catalog key for a raw name, or the lowercased name itself.
    pub fn canonical_key(&self, name: &str) -> String {
        let lower = name.to_lowercase();
        match self.catalog.resolve_alias(&lower) {
            Some(key) => {
                if key != lower {
                    tracing::debug!(alias = %lower, canonical = %key, "Resolved test alias");
                }
                key.to_string()
            }
            None => lower,
        }
    }

    /// Apply alias resolution, display casing, unit and status resolution.
    pub fn normalize_test(&self, candidate: &CandidateTest) -> NormalizedTest {
        let key = self.canonical_key(&candidate.name);
        let name = self.catalog.display_name(&key);
        let unit = self.catalog.normalize_unit(&candidate.unit, &key);
        let ref_range = self.catalog.find_range(&key);

        let status = if candidate.status.is_resolved() {
            candidate.status
        } else {
            ref_range
                .map(|range| range.classify(candidate.value))
                .unwrap_or(TestStatus::Unknown)
        };

        NormalizedTest {
            name,
            value: candidate.value,
            unit,
            status,
            ref_range,
        }
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-test confidence: 0.7 plus 0.1 for each of a known unit, a reference
/// range, and a resolved status, capped at 1.0.
pub fn test_confidence(test: &NormalizedTest) -> f64 {
    let bonuses = [
        test.unit != "unknown",
        test.ref_range.is_some(),
        test.status.is_resolved(),
    ]
    .iter()
    .filter(|&&hit| hit)
    .count();

    ((7 + bonuses) as f64 / 10.0).min(1.0)
}
