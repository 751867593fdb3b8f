//! Serve command - run the HTTP API.

use std::path::PathBuf;
use std::sync::Arc;

use colored::Colorize;

use super::{build_extractor, build_pipeline};
use crate::cli::ExtractorChoice;
use crate::server::{app, state::AppState};

pub fn run(
    port: u16,
    extractor: ExtractorChoice,
    model: Option<String>,
    catalog: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    // Blocking HTTP clients must be built outside the async runtime.
    let pipeline = build_pipeline(catalog.as_deref())?;
    let extractor = build_extractor(extractor, model, pipeline.catalog().clone())?;
    let pipeline = pipeline.with_shared_extractor(extractor);

    let state = AppState::new(Arc::new(pipeline));

    let url = format!("http://localhost:{}", port);
    println!();
    println!(
        "{} {}",
        "Starting labscribe API at".cyan().bold(),
        url.white().bold()
    );
    println!();
    println!("  Extractor: {}", state.extractor_name());
    println!();
    println!("Press {} to stop the server", "Ctrl+C".yellow().bold());
    println!();

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(app::run_server(state, port))?;

    Ok(())
}
