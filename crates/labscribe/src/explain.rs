//! Plain-language summary and per-test explanations.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::ReferenceCatalog;
use crate::model::NormalizedTest;

/// Summary used when no result is low or high.
pub const ALL_NORMAL_SUMMARY: &str = "All test results are normal.";

/// Patient-facing output for a batch of normalized tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explanation {
    /// One sentence listing the abnormal results.
    pub summary: String,
    /// One explanation per test, in input order.
    pub explanations: Vec<String>,
}

/// Builds summaries and explanations from catalog templates.
///
/// Performs no validation; input is expected to have passed the
/// consistency guard.
#[derive(Debug, Clone)]
pub struct Explainer {
    catalog: Arc<ReferenceCatalog>,
}

impl Explainer {
    /// Create an explainer over the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(ReferenceCatalog::shared())
    }

    pub fn with_catalog(catalog: Arc<ReferenceCatalog>) -> Self {
        Self { catalog }
    }

    pub fn explain(&self, tests: &[NormalizedTest]) -> Explanation {
        Explanation {
            summary: self.summary(tests),
            explanations: tests.iter().map(|t| self.explain_test(t)).collect(),
        }
    }

    /// One sentence naming each abnormal result by its long-form name.
    pub fn summary(&self, tests: &[NormalizedTest]) -> String {
        let descriptions: Vec<String> = tests
            .iter()
            .filter(|t| t.status.is_abnormal())
            .map(|t| format!("{} {}", t.status.as_str(), self.catalog.full_name(&t.name)))
            .collect();

        if descriptions.is_empty() {
            return ALL_NORMAL_SUMMARY.to_string();
        }
        uppercase_first(&join_english(&descriptions))
    }

    /// Template text with the long-form name swapped for the short form, or
    /// `"<Status> <short name>."` when there is no template.
    pub fn explain_test(&self, test: &NormalizedTest) -> String {
        let short_name = self.catalog.short_name(&test.name);

        match self.catalog.template(&test.name, test.status) {
            Some(template) => {
                let full_name = self.catalog.full_name(&test.name);
                replace_first_ignore_case(template, &full_name, &short_name)
            }
            None => format!("{} {}.", test.status.label(), short_name),
        }
    }
}

impl Default for Explainer {
    fn default() -> Self {
        Self::new()
    }
}

/// "a." / "a and b." / "a, b, and c."
fn join_english(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => format!("{}.", only),
        [first, second] => format!("{} and {}.", first, second),
        [init @ .., last] => format!("{}, and {}.", init.join(", "), last),
    }
}

/// Uppercase the first character, leaving the rest untouched.
fn uppercase_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Replace the first ASCII case-insensitive occurrence of `needle`.
fn replace_first_ignore_case(text: &str, needle: &str, replacement: &str) -> String {
    if needle.is_empty() {
        return text.to_string();
    }
    // ASCII lowercasing keeps byte offsets aligned with `text`.
    match text.to_ascii_lowercase().find(&needle.to_ascii_lowercase()) {
        Some(start) => {
            let end = start + needle.len();
            format!("{}{}{}", &text[..start], replacement, &text[end..])
        }
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{RefRange, TestStatus};

    fn test(name: &str, status: TestStatus) -> NormalizedTest {
        NormalizedTest {
            name: name.to_string(),
            value: 1.0,
            unit: "unknown".to_string(),
            status,
            ref_range: Some(RefRange::new(0.0, 2.0)),
        }
    }

    #[test]
    fn test_single_abnormal_summary() {
        let explainer = Explainer::new();
        let summary = explainer.summary(&[test("Hemoglobin", TestStatus::Low)]);
        assert_eq!(summary, "Low hemoglobin.");
    }

    #[test]
    fn test_two_abnormal_summary() {
        let explainer = Explainer::new();
        let summary = explainer.summary(&[
            test("Glucose", TestStatus::High),
            test("RBC", TestStatus::Normal),
            test("Hemoglobin", TestStatus::Low),
        ]);
        assert_eq!(summary, "High blood sugar and low hemoglobin.");
    }

    #[test]
    fn test_three_abnormal_summary() {
        let explainer = Explainer::new();
        let summary = explainer.summary(&[
            test("Hemoglobin", TestStatus::Low),
            test("WBC", TestStatus::High),
            test("Platelet", TestStatus::Low),
        ]);
        assert_eq!(
            summary,
            "Low hemoglobin, high white blood cell count, and low platelet count."
        );
    }

    #[test]
    fn test_unknown_test_uses_own_name() {
        let explainer = Explainer::new();
        let summary = explainer.summary(&[test("Cortisol", TestStatus::High)]);
        assert_eq!(summary, "High Cortisol.");
    }

    #[test]
    fn test_all_normal() {
        let explainer = Explainer::new();
        let tests = vec![test("Hemoglobin", TestStatus::Normal), test("WBC", TestStatus::Normal)];
        let explanation = explainer.explain(&tests);

        assert_eq!(explanation.summary, ALL_NORMAL_SUMMARY);
        assert_eq!(
            explanation.explanations,
            vec!["Hemoglobin level is normal.", "WBC is normal."]
        );
    }

    #[test]
    fn test_template_short_name_substitution() {
        let explainer = Explainer::new();
        assert_eq!(
            explainer.explain_test(&test("Hemoglobin", TestStatus::Low)),
            "Low Hemoglobin may relate to anemia."
        );
        assert_eq!(
            explainer.explain_test(&test("WBC", TestStatus::High)),
            "High WBC can occur with infections."
        );
        assert_eq!(
            explainer.explain_test(&test("Glucose", TestStatus::Normal)),
            "Glucose level is normal."
        );
        assert_eq!(
            explainer.explain_test(&test("Platelet", TestStatus::Low)),
            "Low Platelet may affect blood clotting."
        );
    }

    #[test]
    fn test_fallback_explanation() {
        let explainer = Explainer::new();
        assert_eq!(explainer.explain_test(&test("Sodium", TestStatus::High)), "High Sodium.");
        assert_eq!(explainer.explain_test(&test("RBC", TestStatus::Unknown)), "Unknown RBC.");
    }

    #[test]
    fn test_join_english() {
        let items: Vec<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        assert_eq!(join_english(&items[..1]), "a.");
        assert_eq!(join_english(&items[..2]), "a and b.");
        assert_eq!(join_english(&items), "a, b, c, and d.");
    }

    #[test]
    fn test_replacement_is_literal() {
        let out = replace_first_ignore_case("Level of X.Y is $1", "x.y", "$0");
        assert_eq!(out, "Level of $0 is $1");
    }

    #[test]
    fn test_replace_first_only() {
        assert_eq!(
            replace_first_ignore_case("Blood sugar and blood sugar", "BLOOD SUGAR", "Glucose"),
            "Glucose and blood sugar"
        );
        assert_eq!(replace_first_ignore_case("No match here", "sodium", "Na"), "No match here");
        assert_eq!(replace_first_ignore_case("Unchanged", "", "x"), "Unchanged");
    }

    #[test]
    fn test_custom_display_name_keeps_templates() {
        use crate::catalog::{ExplanationTemplates, ReferenceEntry};

        let catalog = ReferenceCatalog::new().with_entry(
            "wbc",
            ReferenceEntry::new(4000.0, 11000.0)
                .with_names("White Blood Cells", "white blood cell count", "WBC")
                .with_explanations(ExplanationTemplates::new(
                    "Low white blood cell count may weaken immunity.",
                    "White blood cell count is normal.",
                    "High white blood cell count can occur with infections.",
                )),
        );
        let explainer = Explainer::with_catalog(Arc::new(catalog));
        let explanation = explainer.explain(&[test("White Blood Cells", TestStatus::High)]);

        assert_eq!(explanation.summary, "High white blood cell count.");
        assert_eq!(
            explanation.explanations,
            vec!["High WBC can occur with infections."]
        );
    }
}
