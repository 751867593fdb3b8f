//! Structural deduplication of candidate tests.

use std::collections::HashSet;

use crate::model::CandidateTest;

/// Drop candidates whose `name-value-unit` key was already seen.
///
/// The first occurrence wins and input order is preserved, so applying this
/// twice gives the same result as applying it once.
pub fn dedupe(candidates: &[CandidateTest]) -> Vec<CandidateTest> {
    let mut seen: HashSet<String> = HashSet::with_capacity(candidates.len());
    let mut unique = Vec::with_capacity(candidates.len());

    for candidate in candidates {
        if seen.insert(candidate.dedupe_key()) {
            unique.push(candidate.clone());
        }
    }

    let dropped = candidates.len() - unique.len();
    if dropped > 0 {
        tracing::debug!(dropped, kept = unique.len(), "Removed duplicate candidate tests");
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TestStatus;

    #[test]
    fn test_first_occurrence_wins() {
        let candidates = vec![
            CandidateTest::new("hemoglobin", 9.5, "g/dL", TestStatus::Low),
            CandidateTest::new("wbc", 12000.0, "/uL", TestStatus::High),
            CandidateTest::new("hemoglobin", 9.5, "g/dL", TestStatus::Normal),
        ];

        let unique = dedupe(&candidates);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].status, TestStatus::Low);
        assert_eq!(unique[1].name, "wbc");
    }

    #[test]
    fn test_key_is_case_sensitive_on_name_and_unit() {
        let candidates = vec![
            CandidateTest::new("hemoglobin", 9.5, "g/dL", TestStatus::Low),
            CandidateTest::new("Hemoglobin", 9.5, "g/dL", TestStatus::Low),
            CandidateTest::new("hemoglobin", 9.5, "g/dl", TestStatus::Low),
            CandidateTest::new("hemoglobin", 9.6, "g/dL", TestStatus::Low),
        ];
        assert_eq!(dedupe(&candidates).len(), 4);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe(&[]).is_empty());
    }
}
