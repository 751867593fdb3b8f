//! Normalize command - normalize raw test strings from a file.

use std::path::PathBuf;

use colored::Colorize;
use labscribe::normalize::test_confidence;
use labscribe::{Outcome, RawTestInput};

use super::{build_pipeline, print_tests, print_unprocessed};

pub fn run(
    file: PathBuf,
    json_output: bool,
    catalog: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;

    let inputs: Vec<RawTestInput> = contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(RawTestInput::from)
        .collect();

    let pipeline = build_pipeline(catalog.as_deref())?;
    let outcome = pipeline.normalize(&inputs);

    if json_output {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
        return Ok(());
    }

    match outcome {
        Outcome::Processed(result) => {
            println!(
                "{} {} of {} lines (confidence {:.2})",
                "Normalized".cyan().bold(),
                result.tests.len().to_string().white().bold(),
                inputs.len(),
                result.normalization_confidence
            );
            print_tests(&result.tests);

            if verbose {
                println!();
                for test in &result.tests {
                    println!(
                        "  {:<16} {} {:.2}",
                        test.name,
                        "confidence".dimmed(),
                        test_confidence(test)
                    );
                }
            }
        }
        Outcome::Unprocessed(failure) => print_unprocessed(&failure.reason),
    }

    Ok(())
}
