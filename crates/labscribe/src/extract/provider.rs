//! Extractor trait and types.

use serde::{Deserialize, Serialize};

use crate::error::{LabscribeError, Result};

/// What the extraction collaborator is asked to read.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionInput {
    /// Report text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Encoded report image (JPEG/PNG bytes). Takes precedence over text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<Vec<u8>>,
}

impl ExtractionInput {
    /// Input with report text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            image: None,
        }
    }

    /// Input with image bytes only.
    pub fn image(bytes: Vec<u8>) -> Self {
        Self {
            text: None,
            image: Some(bytes),
        }
    }

    /// Reject inputs that carry neither text nor image.
    pub fn validate(&self) -> Result<()> {
        let has_text = self.text.as_deref().is_some_and(|t| !t.trim().is_empty());
        let has_image = self.image.as_ref().is_some_and(|i| !i.is_empty());
        if has_text || has_image {
            Ok(())
        } else {
            Err(LabscribeError::InvalidRequest(
                "Either text or image required".to_string(),
            ))
        }
    }
}

/// Raw strings recognized by an extractor, plus its self-reported confidence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    pub tests_raw: Vec<String>,
    /// Heuristic certainty in `[0, 1]`.
    pub confidence: f64,
}

impl Extraction {
    pub fn new(tests_raw: Vec<String>, confidence: f64) -> Self {
        Self {
            tests_raw,
            confidence,
        }
    }
}

/// Configuration for extractors.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    /// Model to use (LLM-backed extractors only).
    pub model: String,

    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,

    /// HTTP timeout for remote extractors.
    pub timeout_secs: u64,

    /// Degrade to placeholder / heuristic output instead of failing when the
    /// backend is unreachable or returns garbage.
    pub fallback_on_error: bool,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            model: "llama3.2".to_string(),
            max_tokens: 1024,
            temperature: 0.1,
            timeout_secs: 120,
            fallback_on_error: true,
        }
    }
}

/// The external "recognize tests in this input" capability.
///
/// Implementations report soft failures as a low-confidence placeholder
/// string inside an `Ok`; only hard failures are returned as `Err`.
/// No retries are attempted.
pub trait Extractor: Send + Sync {
    /// Recognize raw test strings in the input.
    fn extract(&self, input: &ExtractionInput) -> Result<Extraction>;

    /// Get the configuration for this extractor.
    fn config(&self) -> &ExtractorConfig;

    /// Get the name of this extractor (for logging/debugging).
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_requires_text_or_image() {
        assert!(ExtractionInput::text("Hemoglobin 9.5").validate().is_ok());
        assert!(ExtractionInput::image(vec![0xFF, 0xD8]).validate().is_ok());

        let err = ExtractionInput::default().validate().unwrap_err();
        assert!(matches!(err, LabscribeError::InvalidRequest(_)));

        assert!(ExtractionInput::text("   ").validate().is_err());
        assert!(ExtractionInput::image(Vec::new()).validate().is_err());
    }
}
