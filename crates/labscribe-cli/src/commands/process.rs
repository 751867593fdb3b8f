//! Process command - extract, normalize and explain a report.

use std::path::PathBuf;

use colored::Colorize;
use labscribe::{ExtractionInput, Extractor, Outcome};

use super::{build_extractor, build_pipeline, print_explanation, print_tests, print_unprocessed};
use crate::cli::ExtractorChoice;

/// Arguments of the process command.
pub struct ProcessArgs {
    pub file: Option<PathBuf>,
    pub text: Option<String>,
    pub image: Option<PathBuf>,
    pub extractor: ExtractorChoice,
    pub model: Option<String>,
    pub json: bool,
}

pub fn run(
    args: ProcessArgs,
    catalog: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let text = match (&args.text, &args.file) {
        (Some(text), _) => Some(text.clone()),
        (None, Some(file)) => Some(
            std::fs::read_to_string(file)
                .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?,
        ),
        (None, None) => None,
    };
    let image = match &args.image {
        Some(path) => Some(
            std::fs::read(path).map_err(|e| format!("Failed to read {}: {}", path.display(), e))?,
        ),
        None => None,
    };

    if text.is_none() && image.is_none() {
        return Err("Provide a report FILE, --text, or --image".into());
    }
    let input = ExtractionInput { text, image };

    let pipeline = build_pipeline(catalog.as_deref())?;
    let extractor = build_extractor(args.extractor, args.model, pipeline.catalog().clone())?;
    let pipeline = pipeline.with_shared_extractor(extractor);

    if verbose && !args.json {
        if let Some(extractor) = pipeline.extractor() {
            println!(
                "{} {} (model {})",
                "Extractor:".dimmed(),
                extractor.name(),
                extractor.config().model
            );
        }
    }

    let outcome = pipeline.run(&input)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        Outcome::Processed(report) => {
            println!(
                "{} {} tests",
                "Found".cyan().bold(),
                report.tests.len().to_string().white().bold()
            );
            print_tests(&report.tests);
            print_explanation(&report.summary, &report.explanations);

            if verbose {
                println!();
                println!(
                    "{} extraction {:.2}, normalization {:.2}",
                    "Confidence:".dimmed(),
                    report.extraction_confidence.unwrap_or_default(),
                    report.normalization_confidence
                );
            }
        }
        Outcome::Unprocessed(failure) => print_unprocessed(&failure.reason),
    }

    Ok(())
}
