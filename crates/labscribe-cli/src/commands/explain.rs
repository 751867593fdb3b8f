//! Explain command - summarize already normalized tests.

use std::path::PathBuf;

use labscribe::{NormalizedTest, Outcome};

use super::{build_pipeline, print_explanation, print_unprocessed};

pub fn run(
    file: PathBuf,
    catalog: Option<PathBuf>,
    verbose: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(&file)
        .map_err(|e| format!("Failed to read {}: {}", file.display(), e))?;
    let tests: Vec<NormalizedTest> = serde_json::from_str(&contents)
        .map_err(|e| format!("Expected a JSON array of normalized tests: {}", e))?;

    if verbose {
        println!("Loaded {} tests from {}", tests.len(), file.display());
    }

    let pipeline = build_pipeline(catalog.as_deref())?;
    match pipeline.summarize(&tests) {
        Outcome::Processed(explanation) => {
            print_explanation(&explanation.summary, &explanation.explanations)
        }
        Outcome::Unprocessed(failure) => print_unprocessed(&failure.reason),
    }

    Ok(())
}
