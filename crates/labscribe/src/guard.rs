//! Provenance check between extracted and normalized tests.
//!
//! The extraction collaborator is a generative recognizer and can invent
//! tests. Every normalized name must share a substring relation (either
//! direction, case-insensitive) with some originally extracted name, or the
//! whole batch is rejected.

use serde::{Deserialize, Serialize};

use crate::model::{CandidateTest, NormalizedTest};

/// Reason attached to every provenance rejection.
pub const HALLUCINATION_REASON: &str = "hallucinated tests not present in input";

/// Rejection signal. Not an error: callers show it as "could not verify".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuardFailure {
    pub reason: String,
}

impl GuardFailure {
    pub fn hallucinated() -> Self {
        Self {
            reason: HALLUCINATION_REASON.to_string(),
        }
    }
}

/// Tagged pipeline result; check the discriminant before reading the payload.
///
/// Serializes as the payload's fields plus `"status": "ok"`, or as
/// `{"status": "unprocessed", "reason": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status")]
pub enum Outcome<T> {
    #[serde(rename = "ok")]
    Processed(T),
    #[serde(rename = "unprocessed")]
    Unprocessed(GuardFailure),
}

impl<T> Outcome<T> {
    pub fn is_processed(&self) -> bool {
        matches!(self, Outcome::Processed(_))
    }

    /// Payload if processed.
    pub fn processed(&self) -> Option<&T> {
        match self {
            Outcome::Processed(value) => Some(value),
            Outcome::Unprocessed(_) => None,
        }
    }

    pub fn into_processed(self) -> Option<T> {
        match self {
            Outcome::Processed(value) => Some(value),
            Outcome::Unprocessed(_) => None,
        }
    }

    /// Rejection if unprocessed.
    pub fn failure(&self) -> Option<&GuardFailure> {
        match self {
            Outcome::Processed(_) => None,
            Outcome::Unprocessed(failure) => Some(failure),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Outcome<U> {
        match self {
            Outcome::Processed(value) => Outcome::Processed(f(value)),
            Outcome::Unprocessed(failure) => Outcome::Unprocessed(failure),
        }
    }
}

/// Verify that every normalized test traces back to an original name.
///
/// Returns `None` when the batch is consistent.
pub fn check(original: &[CandidateTest], normalized: &[NormalizedTest]) -> Option<GuardFailure> {
    let original_names: Vec<String> = original.iter().map(|t| t.name.to_lowercase()).collect();
    let unverified = unverified_names(&original_names, normalized);

    if unverified.is_empty() {
        None
    } else {
        tracing::warn!(
            unverified = ?unverified,
            "Rejecting batch: normalized tests not present in extracted input"
        );
        Some(GuardFailure::hallucinated())
    }
}

/// Names of normalized tests with no substring relation to any original name.
pub fn unverified_names<'a>(original_names: &[String], normalized: &'a [NormalizedTest]) -> Vec<&'a str> {
    normalized
        .iter()
        .filter(|test| {
            let name = test.name.to_lowercase();
            !original_names
                .iter()
                .any(|orig| name.contains(orig.as_str()) || orig.contains(name.as_str()))
        })
        .map(|test| test.name.as_str())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestStatus;

    fn original(names: &[&str]) -> Vec<CandidateTest> {
        names
            .iter()
            .map(|n| CandidateTest::new(*n, 1.0, "", TestStatus::Normal))
            .collect()
    }

    fn normalized(names: &[&str]) -> Vec<NormalizedTest> {
        names
            .iter()
            .map(|n| NormalizedTest {
                name: n.to_string(),
                value: 1.0,
                unit: "unknown".to_string(),
                status: TestStatus::Normal,
                ref_range: None,
            })
            .collect()
    }

    #[test]
    fn test_passes_on_case_insensitive_match() {
        let result = check(&original(&["hemoglobin", "wbc"]), &normalized(&["Hemoglobin", "WBC"]));
        assert!(result.is_none());
    }

    #[test]
    fn test_passes_on_substring_either_direction() {
        // normalized contained in original
        assert!(check(&original(&["glucose fasting"]), &normalized(&["Glucose"])).is_none());
        // original contained in normalized
        assert!(check(&original(&["plt"]), &normalized(&["Plt count"])).is_none());
    }

    #[test]
    fn test_rejects_invented_test() {
        let result = check(&original(&["hemoglobin"]), &normalized(&["Hemoglobin", "Cortisol"]));
        let failure = result.expect("cortisol should be rejected");
        assert_eq!(failure.reason, HALLUCINATION_REASON);
    }

    #[test]
    fn test_alias_resolved_name_without_textual_overlap_is_rejected() {
        // "white blood cell" normalizes to "WBC", which shares no substring with it.
        assert!(check(&original(&["white blood cell"]), &normalized(&["WBC"])).is_some());
    }

    #[test]
    fn test_empty_normalized_batch_passes() {
        assert!(check(&original(&["hemoglobin"]), &[]).is_none());
        assert!(check(&[], &[]).is_none());
    }

    #[test]
    fn test_unverified_names_lists_offenders() {
        let names = vec!["hemoglobin".to_string()];
        let tests = normalized(&["Hemoglobin", "Cortisol", "TSH"]);
        assert_eq!(unverified_names(&names, &tests), vec!["Cortisol", "TSH"]);
    }

    #[test]
    fn test_outcome_serialization() {
        let rejected: Outcome<serde_json::Value> = Outcome::Unprocessed(GuardFailure::hallucinated());
        let json = serde_json::to_value(&rejected).unwrap();
        assert_eq!(json["status"], "unprocessed");
        assert_eq!(json["reason"], HALLUCINATION_REASON);
    }
}
