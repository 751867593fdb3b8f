//! Mock extractor for testing.

use super::provider::{Extraction, ExtractionInput, Extractor, ExtractorConfig};
use crate::error::{LabscribeError, Result};

/// Default confidence reported by the mock.
const MOCK_CONFIDENCE: f64 = 0.95;

/// Mock extractor that returns predictable output for testing.
///
/// Without canned tests it echoes the non-empty lines of the input text.
#[derive(Debug, Clone)]
pub struct MockExtractor {
    config: ExtractorConfig,
    tests: Option<Vec<String>>,
    confidence: f64,
    failure: Option<String>,
}

impl MockExtractor {
    /// Create a new echoing mock extractor.
    pub fn new() -> Self {
        Self {
            config: ExtractorConfig::default(),
            tests: None,
            confidence: MOCK_CONFIDENCE,
            failure: None,
        }
    }

    /// Always return these raw test strings.
    pub fn with_tests<I, S>(mut self, tests: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tests = Some(tests.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Mock that fails every extraction with the given message.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::new()
        }
    }
}

impl Default for MockExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for MockExtractor {
    fn extract(&self, input: &ExtractionInput) -> Result<Extraction> {
        input.validate()?;

        if let Some(message) = &self.failure {
            return Err(LabscribeError::Extraction(message.clone()));
        }

        let tests_raw = match &self.tests {
            Some(tests) => tests.clone(),
            None => input
                .text
                .as_deref()
                .unwrap_or_default()
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty())
                .map(str::to_string)
                .collect(),
        };

        Ok(Extraction::new(tests_raw, self.confidence))
    }

    fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_echoes_input_lines() {
        let mock = MockExtractor::new();
        let result = mock
            .extract(&ExtractionInput::text("Hemoglobin 9.5 g/dL (low)\n\n  WBC 8000 /uL  \n"))
            .unwrap();

        assert_eq!(result.tests_raw, vec!["Hemoglobin 9.5 g/dL (low)", "WBC 8000 /uL"]);
        assert_eq!(result.confidence, MOCK_CONFIDENCE);
    }

    #[test]
    fn test_canned_tests() {
        let mock = MockExtractor::new()
            .with_tests(["Cortisol 18 ug/dL"])
            .with_confidence(0.7);
        let result = mock.extract(&ExtractionInput::image(vec![1, 2, 3])).unwrap();

        assert_eq!(result.tests_raw, vec!["Cortisol 18 ug/dL"]);
        assert_eq!(result.confidence, 0.7);
    }

    #[test]
    fn test_failing_mock() {
        let mock = MockExtractor::failing("backend down");
        let err = mock.extract(&ExtractionInput::text("Hemoglobin 9.5")).unwrap_err();
        assert!(matches!(err, LabscribeError::Extraction(m) if m == "backend down"));
    }

    #[test]
    fn test_still_validates_input() {
        let mock = MockExtractor::new();
        assert!(matches!(
            mock.extract(&ExtractionInput::default()),
            Err(LabscribeError::InvalidRequest(_))
        ));
    }
}
