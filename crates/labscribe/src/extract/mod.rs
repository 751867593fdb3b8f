//! Extraction of raw test strings from report text or images.
//!
//! Extraction is the external collaborator of the pipeline: it turns a report
//! into strings such as `"Hemoglobin 9.5 g/dL (low)"` plus a confidence.
//! Its output is untrusted and goes through parsing, normalization and the
//! consistency guard before anything is explained.
//!
//! # Extractors
//!
//! - **Heuristic** - typo correction and pattern scanning, text only
//! - **Ollama** - local models, text and (with a vision model) images
//! - **Mock** - echoes input lines or canned strings, for tests
//!
//! # Example
//!
//! ```no_run
//! use labscribe::{ExtractionInput, Extractor, OllamaExtractor};
//!
//! let extractor = OllamaExtractor::with_model("llama3.2").unwrap();
//! let extraction = extractor
//!     .extract(&ExtractionInput::text("Hemoglobin 9.5 g/dL (low)"))
//!     .unwrap();
//! println!("{:?}", extraction.tests_raw);
//! ```

mod heuristic;
mod mock;
mod ollama;
mod prompts;
mod provider;

pub use heuristic::{
    HeuristicExtractor, HEURISTIC_CONFIDENCE, IMAGE_FAILURE_CONFIDENCE,
    IMAGE_FAILURE_PLACEHOLDER, NO_TESTS_PLACEHOLDER,
};
pub use mock::MockExtractor;
pub use ollama::{OllamaExtractor, IMAGE_PROSE_CONFIDENCE, LLM_CONFIDENCE};
pub use provider::{Extraction, ExtractionInput, Extractor, ExtractorConfig};
