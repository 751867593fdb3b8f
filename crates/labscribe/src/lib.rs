//! Labscribe: patient-friendly summaries of laboratory reports.
//!
//! Raw lab results (free text such as `"Hemoglobin 9.5 g/dL (low)"`, or loose
//! records) are parsed, deduplicated, normalized against a reference catalog,
//! checked for provenance, and explained in plain language.
//!
//! # Core Principles
//!
//! - **Catalog-driven**: one ordered table of tests drives aliases, ranges,
//!   units and explanation text
//! - **Untrusted extraction**: anything an extractor returns must trace back
//!   to the input, or the batch is rejected as unprocessed
//! - **No diagnosis**: output is descriptive only
//!
//! # Example
//!
//! ```
//! use labscribe::{LabPipeline, RawTestInput};
//!
//! let pipeline = LabPipeline::new();
//! let outcome = pipeline.run_raw(&[RawTestInput::from("Hemoglobin 9.5 g/dL (low)")]);
//!
//! let report = outcome.processed().unwrap();
//! assert_eq!(report.summary, "Low hemoglobin.");
//! ```

pub mod catalog;
pub mod error;
pub mod explain;
pub mod extract;
pub mod guard;
pub mod input;
pub mod model;
pub mod normalize;

mod pipeline;

pub use crate::pipeline::{LabPipeline, PipelineConfig, PipelineReport};
pub use catalog::{ExplanationTemplates, ReferenceCatalog, ReferenceEntry};
pub use error::{LabscribeError, Result};
pub use explain::{Explainer, Explanation};
pub use extract::{
    Extraction, ExtractionInput, Extractor, ExtractorConfig, HeuristicExtractor, MockExtractor,
    OllamaExtractor,
};
pub use guard::{GuardFailure, Outcome};
pub use input::{Parser, ParserConfig, RawTestInput, RecordValue, StructuredRecord};
pub use model::{CandidateTest, NormalizedTest, RefRange, TestStatus};
pub use normalize::{NormalizationResult, Normalizer};
