//! Rule-based extraction from report text, no network required.
//!
//! Corrects common typos, then scans for `name value [unit] [(status)]`
//! runs. Missing units and statuses are filled in from the catalog. Used on
//! its own, and as the fallback when an LLM-backed extractor cannot answer.

use std::sync::Arc;

use indexmap::IndexSet;
use once_cell::sync::Lazy;
use regex::Regex;

use super::provider::{Extraction, ExtractionInput, Extractor, ExtractorConfig};
use crate::catalog::{capitalize_first, ReferenceCatalog};
use crate::error::Result;
use crate::input::parse_leading_number;
use crate::model::TestStatus;

/// Confidence of heuristic extraction from text.
pub const HEURISTIC_CONFIDENCE: f64 = 0.80;

/// Confidence reported alongside [`IMAGE_FAILURE_PLACEHOLDER`].
pub const IMAGE_FAILURE_CONFIDENCE: f64 = 0.50;

/// Emitted when no test could be found in the text.
pub const NO_TESTS_PLACEHOLDER: &str = "No tests detected";

/// Emitted when an image could not be read.
pub const IMAGE_FAILURE_PLACEHOLDER: &str = "Image processing failed. Please try text input.";

/// Whole-word typo and shorthand corrections, applied in order.
static CORRECTIONS: Lazy<Vec<(Regex, &'static str)>> = Lazy::new(|| {
    [
        (
            r"(?i)\b(?:hemoglowbin|hemoglowin|hemoglow|hemogloin|hemoglo|hemglobin|hmoglobin|hgb|hg)\b",
            "Hemoglobin",
        ),
        (r"(?i)\bwbc\s+count\b", "WBC"),
        (r"(?i)\brbc\s+count\b", "RBC"),
        (r"(?i)\b(?:platlet|plt)\b", "Platelet"),
        (r"(?i)\b(?:glocuse|blood\s+sugar|sugar)\b", "Glucose"),
        (r"(?i)\bhgh\b", "High"),
        (r"(?i)\blo\b", "Low"),
        (r"(?i)\blow\b", "Low"),
        (r"(?i)\bhigh\b", "High"),
        (r"(?i)\bnormal\b", "Normal"),
    ]
    .into_iter()
    .map(|(pattern, replacement)| {
        (
            Regex::new(pattern).expect("correction pattern is valid"),
            replacement,
        )
    })
    .collect()
});

/// Single-word name followed by a value, with and without a colon.
static TEST_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)\b([a-z]+)\b\s+([0-9.]+)\s*([a-z/%]*)\s*\(?\s*(low|high|normal)?\s*\)?",
        r"(?i)\b([a-z]+)\b:?\s*([0-9.]+)\s*([a-z/%]*)\s*\(?\s*(low|high|normal)?\s*\)?",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("test pattern is valid"))
    .collect()
});

/// Display names for misspellings and shorthand that survive correction.
const NAME_FIXES: &[(&str, &str)] = &[
    ("hemoglowbin", "Hemoglobin"),
    ("hemoglowin", "Hemoglobin"),
    ("hemoglow", "Hemoglobin"),
    ("hemogloin", "Hemoglobin"),
    ("hemoglo", "Hemoglobin"),
    ("hemglobin", "Hemoglobin"),
    ("hmoglobin", "Hemoglobin"),
    ("hgb", "Hemoglobin"),
    ("hg", "Hemoglobin"),
    ("wbc", "WBC"),
    ("rbc", "RBC"),
    ("platlet", "Platelet"),
    ("platelets", "Platelet"),
    ("plt", "Platelet"),
    ("glocuse", "Glucose"),
    ("sugar", "Glucose"),
];

/// Heuristic text extractor.
#[derive(Debug, Clone)]
pub struct HeuristicExtractor {
    config: ExtractorConfig,
    catalog: Arc<ReferenceCatalog>,
}

impl HeuristicExtractor {
    /// Create a heuristic extractor over the built-in catalog.
    pub fn new() -> Self {
        Self::with_catalog(ReferenceCatalog::shared())
    }

    pub fn with_catalog(catalog: Arc<ReferenceCatalog>) -> Self {
        Self {
            config: ExtractorConfig::default(),
            catalog,
        }
    }

    /// Extract from text, reporting the given confidence.
    pub fn extract_text(&self, text: &str, confidence: f64) -> Extraction {
        let corrected = correct_text(text);
        let mut found: IndexSet<String> = IndexSet::new();

        for pattern in TEST_PATTERNS.iter() {
            for caps in pattern.captures_iter(&corrected) {
                let (Some(name), Some(value)) = (caps.get(1), caps.get(2)) else {
                    continue;
                };
                let Some(value) = parse_leading_number(value.as_str()) else {
                    continue;
                };

                let name = clean_name(name.as_str());
                let unit = match caps.get(3).map(|m| m.as_str().trim()) {
                    Some(unit) if !unit.is_empty() => unit.to_string(),
                    _ => self.catalog.infer_unit(&name).unwrap_or_default().to_string(),
                };
                let status = match caps.get(4) {
                    Some(word) => capitalize_first(word.as_str()),
                    None => self
                        .catalog
                        .infer_status(&name, value)
                        .unwrap_or(TestStatus::Normal)
                        .label()
                        .to_string(),
                };

                found.insert(format!("{} {} {} ({})", name, value, unit, status));
            }
        }

        let tests_raw: Vec<String> = if found.is_empty() {
            vec![NO_TESTS_PLACEHOLDER.to_string()]
        } else {
            found.into_iter().collect()
        };
        tracing::debug!(count = tests_raw.len(), "Heuristic extraction finished");

        Extraction::new(tests_raw, confidence)
    }
}

impl Default for HeuristicExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for HeuristicExtractor {
    fn extract(&self, input: &ExtractionInput) -> Result<Extraction> {
        input.validate()?;

        if input.image.as_ref().is_some_and(|i| !i.is_empty()) {
            tracing::warn!("Heuristic extractor cannot read images");
            return Ok(image_failure());
        }

        let text = input.text.as_deref().unwrap_or_default();
        Ok(self.extract_text(text, HEURISTIC_CONFIDENCE))
    }

    fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "heuristic"
    }
}

/// Placeholder extraction for unreadable images.
pub(crate) fn image_failure() -> Extraction {
    Extraction::new(
        vec![IMAGE_FAILURE_PLACEHOLDER.to_string()],
        IMAGE_FAILURE_CONFIDENCE,
    )
}

/// Apply typo corrections and strip thousands separators.
fn correct_text(text: &str) -> String {
    let mut corrected = text.to_string();
    for (pattern, replacement) in CORRECTIONS.iter() {
        corrected = pattern.replace_all(&corrected, *replacement).into_owned();
    }
    corrected.replace(',', "")
}

fn clean_name(name: &str) -> String {
    let lower = name.trim().to_lowercase();
    NAME_FIXES
        .iter()
        .find(|(typo, _)| *typo == lower)
        .map(|(_, fixed)| fixed.to_string())
        .unwrap_or_else(|| capitalize_first(name.trim()))
}
