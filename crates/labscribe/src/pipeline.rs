//! Main pipeline struct and public API.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::catalog::ReferenceCatalog;
use crate::error::{LabscribeError, Result};
use crate::explain::{Explainer, Explanation};
use crate::extract::{ExtractionInput, Extractor};
use crate::guard::{self, Outcome};
use crate::input::{Parser, ParserConfig, RawTestInput};
use crate::model::{CandidateTest, NormalizedTest};
use crate::normalize::{dedupe, NormalizationResult, Normalizer};

/// Configuration for the pipeline.
#[derive(Debug, Clone, Default)]
pub struct PipelineConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
}

/// Success payload of a full pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    pub tests: Vec<NormalizedTest>,
    pub summary: String,
    pub explanations: Vec<String>,
    pub normalization_confidence: f64,
    /// Confidence reported by the extractor, when one ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_confidence: Option<f64>,
}

/// Parse, deduplicate, normalize, verify and explain lab results.
///
/// Constructed once and shared; every method is a pure transformation over
/// its input plus the immutable catalog.
pub struct LabPipeline {
    config: PipelineConfig,
    catalog: Arc<ReferenceCatalog>,
    parser: Parser,
    normalizer: Normalizer,
    explainer: Explainer,
    extractor: Option<Arc<dyn Extractor>>,
}

impl LabPipeline {
    /// Create a pipeline over the built-in catalog.
    pub fn new() -> Self {
        Self::with_config(PipelineConfig::default())
    }

    /// Create with custom configuration.
    pub fn with_config(config: PipelineConfig) -> Self {
        let catalog = ReferenceCatalog::shared();
        Self {
            parser: Parser::with_config(config.parser.clone()),
            normalizer: Normalizer::with_catalog(Arc::clone(&catalog)),
            explainer: Explainer::with_catalog(Arc::clone(&catalog)),
            config,
            catalog,
            extractor: None,
        }
    }

    /// Replace the reference catalog.
    pub fn with_catalog(mut self, catalog: Arc<ReferenceCatalog>) -> Self {
        self.normalizer = Normalizer::with_catalog(Arc::clone(&catalog));
        self.explainer = Explainer::with_catalog(Arc::clone(&catalog));
        self.catalog = catalog;
        self
    }

    /// Attach the extractor used by [`LabPipeline::run`].
    pub fn with_extractor(mut self, extractor: impl Extractor + 'static) -> Self {
        self.extractor = Some(Arc::new(extractor));
        self
    }

    /// Attach an already shared extractor.
    pub fn with_shared_extractor(mut self, extractor: Arc<dyn Extractor>) -> Self {
        self.extractor = Some(extractor);
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn catalog(&self) -> &Arc<ReferenceCatalog> {
        &self.catalog
    }

    pub fn extractor(&self) -> Option<&Arc<dyn Extractor>> {
        self.extractor.as_ref()
    }

    /// Name of the attached extractor, if any.
    pub fn extractor_name(&self) -> Option<&str> {
        self.extractor.as_ref().map(|e| e.name())
    }

    /// Parse inputs, dropping noise and duplicates.
    pub fn parse(&self, inputs: &[RawTestInput]) -> Vec<CandidateTest> {
        dedupe(&self.parser.parse_all(inputs))
    }

    /// Parse, normalize and verify a batch of raw inputs.
    pub fn normalize(&self, inputs: &[RawTestInput]) -> Outcome<NormalizationResult> {
        let candidates = self.parse(inputs);
        let result = self.normalizer.normalize(&candidates);

        match guard::check(&candidates, &result.tests) {
            Some(failure) => Outcome::Unprocessed(failure),
            None => Outcome::Processed(result),
        }
    }

    /// Summarize already normalized tests.
    ///
    /// The tests are their own provenance evidence here.
    pub fn summarize(&self, tests: &[NormalizedTest]) -> Outcome<Explanation> {
        let evidence: Vec<CandidateTest> = tests
            .iter()
            .map(|t| CandidateTest::new(t.name.to_lowercase(), t.value, t.unit.clone(), t.status))
            .collect();

        match guard::check(&evidence, tests) {
            Some(failure) => Outcome::Unprocessed(failure),
            None => Outcome::Processed(self.explainer.explain(tests)),
        }
    }

    /// Run the core chain over raw inputs.
    pub fn run_raw(&self, inputs: &[RawTestInput]) -> Outcome<PipelineReport> {
        let candidates = self.parse(inputs);
        let result = self.normalizer.normalize(&candidates);

        if let Some(failure) = guard::check(&candidates, &result.tests) {
            return Outcome::Unprocessed(failure);
        }

        let explanation = self.explainer.explain(&result.tests);
        tracing::info!(
            inputs = inputs.len(),
            tests = result.tests.len(),
            abnormal = result.tests.iter().filter(|t| t.status.is_abnormal()).count(),
            "Pipeline run complete"
        );

        Outcome::Processed(PipelineReport {
            tests: result.tests,
            summary: explanation.summary,
            explanations: explanation.explanations,
            normalization_confidence: result.normalization_confidence,
            extraction_confidence: None,
        })
    }

    /// Extract raw tests from a report and run the core chain on them.
    ///
    /// Only invalid input and hard extraction failures are errors; a
    /// provenance rejection is an [`Outcome::Unprocessed`].
    pub fn run(&self, input: &ExtractionInput) -> Result<Outcome<PipelineReport>> {
        input.validate()?;
        let extractor = self
            .extractor
            .as_ref()
            .ok_or_else(|| LabscribeError::Config("No extractor configured".to_string()))?;

        let extraction = extractor.extract(input)?;
        tracing::debug!(
            extractor = extractor.name(),
            model = %extractor.config().model,
            raw = extraction.tests_raw.len(),
            confidence = extraction.confidence,
            "Extraction complete"
        );

        let inputs: Vec<RawTestInput> = extraction
            .tests_raw
            .into_iter()
            .map(RawTestInput::Text)
            .collect();

        Ok(self.run_raw(&inputs).map(|mut report| {
            report.extraction_confidence = Some(extraction.confidence);
            report
        }))
    }
}

impl Default for LabPipeline {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::{HeuristicExtractor, MockExtractor};
    use crate::guard::HALLUCINATION_REASON;
    use crate::model::{RefRange, TestStatus};

    fn texts(lines: &[&str]) -> Vec<RawTestInput> {
        lines.iter().map(|l| RawTestInput::from(*l)).collect()
    }

    #[test]
    fn test_single_low_hemoglobin() {
        let pipeline = LabPipeline::new();
        let outcome = pipeline.run_raw(&texts(&["Hemoglobin 9.5 g/dL (low)"]));
        let report = outcome.processed().expect("should be processed");

        assert_eq!(report.tests.len(), 1);
        let test = &report.tests[0];
        assert_eq!(test.name, "Hemoglobin");
        assert_eq!(test.value, 9.5);
        assert_eq!(test.unit, "g/dL");
        assert_eq!(test.status, TestStatus::Low);
        assert_eq!(test.ref_range, Some(RefRange::new(12.0, 15.0)));

        assert_eq!(report.summary, "Low hemoglobin.");
        assert_eq!(report.explanations, vec!["Low Hemoglobin may relate to anemia."]);
        assert_eq!(report.normalization_confidence, 0.84);
        assert_eq!(report.extraction_confidence, None);
    }

    #[test]
    fn test_duplicates_collapse() {
        let pipeline = LabPipeline::new();
        let candidates = pipeline.parse(&texts(&[
            "Hemoglobin 9.5 g/dL (low)",
            "hemoglobin 9.5 g/dL",
            "noise without numbers",
        ]));
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_alias_without_overlap_is_unprocessed() {
        let pipeline = LabPipeline::new();
        let outcome = pipeline.normalize(&texts(&["white blood cell 12000 /uL (high)"]));

        let failure = outcome.failure().expect("should be rejected");
        assert_eq!(failure.reason, HALLUCINATION_REASON);
    }

    #[test]
    fn test_empty_input_is_processed() {
        let pipeline = LabPipeline::new();
        let result = pipeline.normalize(&[]).into_processed().unwrap();

        assert!(result.tests.is_empty());
        assert_eq!(result.normalization_confidence, 0.0);
    }

    #[test]
    fn test_summarize_all_normal() {
        let pipeline = LabPipeline::new();
        let result = pipeline.normalize(&texts(&["Hemoglobin 13 g/dL", "WBC 8000 /uL"]));
        let tests = result.into_processed().unwrap().tests;

        let explanation = pipeline.summarize(&tests).into_processed().unwrap();
        assert_eq!(explanation.summary, "All test results are normal.");
        assert_eq!(explanation.explanations.len(), 2);
    }

    #[test]
    fn test_run_with_mock_extractor() {
        let pipeline = LabPipeline::new().with_extractor(
            MockExtractor::new().with_tests(["Glucose 140 mg/dl (high)", "Hemoglobin 9.5 g/dL (low)"]),
        );

        let outcome = pipeline.run(&ExtractionInput::text("ignored")).unwrap();
        let report = outcome.into_processed().unwrap();

        assert_eq!(report.summary, "High blood sugar and low hemoglobin.");
        assert_eq!(report.tests[0].unit, "mg/dL");
        assert_eq!(report.extraction_confidence, Some(0.95));
        assert_eq!(pipeline.extractor_name(), Some("mock"));
    }

    #[test]
    fn test_run_with_heuristic_extractor() {
        let pipeline = LabPipeline::new().with_extractor(HeuristicExtractor::new());
        let outcome = pipeline
            .run(&ExtractionInput::text("hemglobin 9.5 g/dl lo\nplatlet 90,000"))
            .unwrap();
        let report = outcome.into_processed().unwrap();

        let names: Vec<&str> = report.tests.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Hemoglobin", "Platelet"]);
        assert_eq!(report.summary, "Low hemoglobin and low platelet count.");
        assert_eq!(report.extraction_confidence, Some(0.8));
    }

    #[test]
    fn test_attached_extractor_exposes_config() {
        let pipeline = LabPipeline::new().with_extractor(MockExtractor::new());
        let extractor = pipeline.extractor().expect("extractor attached");

        assert_eq!(extractor.name(), "mock");
        assert_eq!(extractor.config().model, "llama3.2");
        assert!(extractor.config().fallback_on_error);
    }

    #[test]
    fn test_run_without_extractor_is_config_error() {
        let pipeline = LabPipeline::new();
        let err = pipeline.run(&ExtractionInput::text("Hemoglobin 9.5")).unwrap_err();
        assert!(matches!(err, LabscribeError::Config(_)));
    }

    #[test]
    fn test_run_rejects_empty_input() {
        let pipeline = LabPipeline::new().with_extractor(MockExtractor::new());
        let err = pipeline.run(&ExtractionInput::default()).unwrap_err();
        assert!(matches!(err, LabscribeError::InvalidRequest(_)));
    }

    #[test]
    fn test_extraction_failure_propagates() {
        let pipeline = LabPipeline::new().with_extractor(MockExtractor::failing("offline"));
        let err = pipeline.run(&ExtractionInput::text("Hemoglobin 9.5")).unwrap_err();
        assert!(matches!(err, LabscribeError::Extraction(_)));
    }
}
