//! Labscribe CLI - patient-friendly lab report summaries.

mod cli;
mod commands;
mod server;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Process {
            file,
            text,
            image,
            extractor,
            model,
            json,
        } => commands::process::run(
            commands::process::ProcessArgs {
                file,
                text,
                image,
                extractor,
                model,
                json,
            },
            cli.catalog,
            cli.verbose,
        ),

        Commands::Normalize { file, json } => {
            commands::normalize::run(file, json, cli.catalog, cli.verbose)
        }

        Commands::Explain { file } => commands::explain::run(file, cli.catalog, cli.verbose),

        Commands::Catalog { json } => commands::catalog::run(json, cli.catalog),

        Commands::Serve {
            port,
            extractor,
            model,
        } => commands::serve::run(port, extractor, model, cli.catalog),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Log to stderr. `RUST_LOG` wins over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = format!(
        "labscribe={},labscribe_cli={},tower_http={}",
        default_level, default_level, default_level
    );

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .with_writer(std::io::stderr)
        .init();
}
