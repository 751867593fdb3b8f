//! Ollama-backed extraction.
//!
//! Sends the report (text, or a base64 image for vision models) to a local
//! Ollama server and reads back a JSON array of tests. Replies without an
//! array, and transport failures when `fallback_on_error` is set, degrade to
//! the heuristic extractor instead of failing the request.

use std::sync::Arc;
use std::time::Duration;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::{json, Value};

use super::heuristic::{image_failure, HeuristicExtractor, HEURISTIC_CONFIDENCE};
use super::prompts;
use super::provider::{Extraction, ExtractionInput, Extractor, ExtractorConfig};
use crate::catalog::ReferenceCatalog;
use crate::error::{LabscribeError, Result};

/// Default Ollama API endpoint.
const DEFAULT_API_URL: &str = "http://localhost:11434/api/chat";

/// Confidence of a well-formed model reply.
pub const LLM_CONFIDENCE: f64 = 0.95;

/// Confidence when an image reply had no JSON array and its prose was
/// scanned heuristically.
pub const IMAGE_PROSE_CONFIDENCE: f64 = 0.90;

/// First `[` through last `]`, across lines.
static JSON_ARRAY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)\[.*\]").expect("json array pattern is valid"));

/// Ollama local LLM extractor.
pub struct OllamaExtractor {
    client: Client,
    api_url: String,
    config: ExtractorConfig,
    heuristic: HeuristicExtractor,
}

impl OllamaExtractor {
    /// Create a new Ollama extractor with default settings.
    ///
    /// Uses llama3.2 by default. Image input needs a vision model such as
    /// `llama3.2-vision`.
    pub fn new() -> Result<Self> {
        Self::with_config(ExtractorConfig::default())
    }

    /// Create with a specific model.
    pub fn with_model(model: impl Into<String>) -> Result<Self> {
        let config = ExtractorConfig {
            model: model.into(),
            ..ExtractorConfig::default()
        };
        Self::with_config(config)
    }

    /// Create with custom configuration.
    pub fn with_config(config: ExtractorConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LabscribeError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let api_url = std::env::var("OLLAMA_HOST")
            .map(|host| format!("{}/api/chat", host.trim_end_matches('/')))
            .unwrap_or_else(|_| DEFAULT_API_URL.to_string());

        Ok(Self {
            client,
            api_url,
            config,
            heuristic: HeuristicExtractor::new(),
        })
    }

    /// Override the chat endpoint.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Catalog used by the heuristic fallback.
    pub fn with_catalog(mut self, catalog: Arc<ReferenceCatalog>) -> Self {
        self.heuristic = HeuristicExtractor::with_catalog(catalog);
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn build_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers
    }

    /// Send one chat turn, optionally with an attached image.
    fn send_message(&self, user_prompt: &str, image: Option<&[u8]>) -> Result<String> {
        let mut user_message = json!({
            "role": "user",
            "content": user_prompt
        });
        if let Some(bytes) = image {
            user_message["images"] = json!([STANDARD.encode(bytes)]);
        }

        let body = json!({
            "model": self.config.model,
            "stream": false,
            "options": {
                "temperature": self.config.temperature,
                "num_predict": self.config.max_tokens
            },
            "messages": [
                {
                    "role": "system",
                    "content": prompts::system_prompt()
                },
                user_message
            ]
        });

        let response = self
            .client
            .post(&self.api_url)
            .headers(self.build_headers())
            .json(&body)
            .send()
            .map_err(|e| {
                if e.is_connect() {
                    LabscribeError::Extraction(
                        "Failed to connect to Ollama. Is it running? Start with: ollama serve"
                            .to_string(),
                    )
                } else {
                    LabscribeError::Extraction(format!("Ollama request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().unwrap_or_default();

            if error_text.contains("not found") {
                return Err(LabscribeError::Extraction(format!(
                    "Model '{}' not found. Pull it with: ollama pull {}",
                    self.config.model, self.config.model
                )));
            }

            return Err(LabscribeError::Extraction(format!(
                "Ollama error ({}): {}",
                status, error_text
            )));
        }

        let api_response: OllamaResponse = response.json().map_err(|e| {
            LabscribeError::Extraction(format!("Failed to parse Ollama response: {}", e))
        })?;

        Ok(api_response.message.content)
    }

    fn extract_text(&self, text: &str) -> Result<Extraction> {
        let prompt = prompts::text_extraction_prompt(text);
        let reply = self
            .send_message(&prompt, None)
            .and_then(|response| parse_reply(&response));

        match reply {
            Ok(Some(tests_raw)) => Ok(Extraction::new(tests_raw, LLM_CONFIDENCE)),
            Ok(None) => {
                tracing::debug!("Ollama reply had no JSON array, using heuristic extraction");
                Ok(self.heuristic.extract_text(text, HEURISTIC_CONFIDENCE))
            }
            Err(e) if self.config.fallback_on_error => {
                tracing::warn!(error = %e, "Ollama extraction failed, using heuristic extraction");
                Ok(self.heuristic.extract_text(text, HEURISTIC_CONFIDENCE))
            }
            Err(e) => Err(e),
        }
    }

    fn extract_image(&self, image: &[u8]) -> Result<Extraction> {
        let prompt = prompts::image_extraction_prompt();
        let reply = self.send_message(&prompt, Some(image)).and_then(|response| {
            let tests = parse_reply(&response)?;
            Ok((response, tests))
        });

        match reply {
            Ok((_, Some(tests_raw))) => Ok(Extraction::new(tests_raw, LLM_CONFIDENCE)),
            Ok((response, None)) => {
                tracing::debug!("Ollama image reply had no JSON array, scanning its text");
                Ok(self.heuristic.extract_text(&response, IMAGE_PROSE_CONFIDENCE))
            }
            Err(e) if self.config.fallback_on_error => {
                tracing::warn!(error = %e, "Ollama image extraction failed");
                Ok(image_failure())
            }
            Err(e) => Err(e),
        }
    }
}

impl Extractor for OllamaExtractor {
    fn extract(&self, input: &ExtractionInput) -> Result<Extraction> {
        input.validate()?;

        match input.image.as_deref().filter(|bytes| !bytes.is_empty()) {
            Some(image) => self.extract_image(image),
            None => self.extract_text(input.text.as_deref().unwrap_or_default()),
        }
    }

    fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    fn name(&self) -> &str {
        "ollama"
    }
}

/// Pull the test array out of a model reply.
///
/// `Ok(None)` when the reply contains no array at all; an error when the
/// array is not valid test JSON.
fn parse_reply(response: &str) -> Result<Option<Vec<String>>> {
    let Some(array) = JSON_ARRAY.find(response) else {
        return Ok(None);
    };

    let tests: Vec<LlmTest> = serde_json::from_str(array.as_str()).map_err(|e| {
        LabscribeError::Extraction(format!("Failed to parse LLM JSON response: {}", e))
    })?;

    Ok(Some(tests.iter().map(LlmTest::render).collect()))
}

/// Ollama API response structure.
#[derive(Debug, Deserialize)]
struct OllamaResponse {
    message: OllamaMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaMessage {
    content: String,
}

/// One test as the model reports it.
#[derive(Debug, Deserialize)]
struct LlmTest {
    name: String,
    value: Value,
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    status: Option<String>,
}

impl LlmTest {
    /// `"name value unit (status)"`, the shape the parser reads back.
    fn render(&self) -> String {
        let value = match &self.value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        let unit = self.unit.as_deref().unwrap_or_default();

        match self.status.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            Some(status) => format!("{} {} {} ({})", self.name, value, unit, status.to_lowercase()),
            None => format!("{} {} {}", self.name, value, unit).trim_end().to_string(),
        }
    }
}
