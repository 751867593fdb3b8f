//! CLI command implementations.

pub mod catalog;
pub mod explain;
pub mod normalize;
pub mod process;
pub mod serve;

use std::path::Path;
use std::sync::Arc;

use colored::Colorize;
use labscribe::{
    Extractor, ExtractorConfig, HeuristicExtractor, LabPipeline, MockExtractor, NormalizedTest,
    OllamaExtractor, ReferenceCatalog, TestStatus,
};

use crate::cli::ExtractorChoice;

/// Built-in catalog, or the one at `path`.
pub fn load_catalog(path: Option<&Path>) -> Result<Arc<ReferenceCatalog>, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(Arc::new(ReferenceCatalog::from_json_file(path)?)),
        None => Ok(ReferenceCatalog::shared()),
    }
}

/// Build the chosen extractor over the given catalog.
pub fn build_extractor(
    choice: ExtractorChoice,
    model: Option<String>,
    catalog: Arc<ReferenceCatalog>,
) -> Result<Arc<dyn Extractor>, Box<dyn std::error::Error>> {
    let extractor: Arc<dyn Extractor> = match choice {
        ExtractorChoice::Heuristic => Arc::new(HeuristicExtractor::with_catalog(catalog)),
        ExtractorChoice::Ollama => {
            let mut config = ExtractorConfig::default();
            if let Some(model) = model {
                config.model = model;
            }
            Arc::new(OllamaExtractor::with_config(config)?.with_catalog(catalog))
        }
        ExtractorChoice::Mock => Arc::new(MockExtractor::new()),
    };
    Ok(extractor)
}

/// Pipeline over the configured catalog, without an extractor.
pub fn build_pipeline(catalog_path: Option<&Path>) -> Result<LabPipeline, Box<dyn std::error::Error>> {
    Ok(LabPipeline::new().with_catalog(load_catalog(catalog_path)?))
}

/// Status word colored by severity.
pub fn colored_status(status: TestStatus) -> colored::ColoredString {
    match status {
        TestStatus::Low => status.label().blue().bold(),
        TestStatus::High => status.label().red().bold(),
        TestStatus::Normal => status.label().green(),
        TestStatus::Unknown => status.label().dimmed(),
    }
}

/// One line per test: name, value, unit, status and reference range.
pub fn print_tests(tests: &[NormalizedTest]) {
    for test in tests {
        let range = test
            .ref_range
            .map(|r| format!("[{} - {}]", r.low, r.high))
            .unwrap_or_else(|| "[no reference]".to_string());
        println!(
            "  {:<16} {:>10} {:<8} {:<8} {}",
            test.name.white().bold(),
            test.value,
            test.unit,
            colored_status(test.status),
            range.dimmed()
        );
    }
}

/// Summary followed by the per-test explanations.
pub fn print_explanation(summary: &str, explanations: &[String]) {
    println!();
    println!("{} {}", "Summary:".cyan().bold(), summary);
    if !explanations.is_empty() {
        println!();
        for explanation in explanations {
            println!("  - {}", explanation);
        }
    }
}

/// Notice for a batch rejected by the provenance guard.
pub fn print_unprocessed(reason: &str) {
    println!(
        "{} results could not be verified: {}",
        "Unprocessed:".yellow().bold(),
        reason
    );
}
