//! CLI argument definitions using clap.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Labscribe: plain-language summaries of lab reports
#[derive(Parser)]
#[command(name = "labscribe")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Reference catalog JSON file (default: built-in catalog)
    #[arg(long, global = true, value_name = "JSON")]
    pub catalog: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Extract, normalize and explain a lab report
    Process {
        /// Report text file (or use --text / --image)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Report text given inline
        #[arg(short, long, conflicts_with = "file")]
        text: Option<String>,

        /// Report image (JPEG/PNG); needs an image-capable extractor
        #[arg(short, long)]
        image: Option<PathBuf>,

        /// Extractor to use
        #[arg(short, long, default_value = "heuristic")]
        extractor: ExtractorChoice,

        /// Model to use (ollama only, e.g. "llama3.2", "llama3.2-vision")
        #[arg(long)]
        model: Option<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Normalize raw test strings (one per line)
    Normalize {
        /// Path to a file of raw test strings
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Summarize a JSON array of normalized tests
    Explain {
        /// Path to a JSON file of normalized tests
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },

    /// List the reference catalog
    Catalog {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Serve the HTTP API
    Serve {
        /// Port for web server
        #[arg(short, long, default_value = "5000")]
        port: u16,

        /// Extractor used by the extraction endpoints
        #[arg(short, long, default_value = "heuristic")]
        extractor: ExtractorChoice,

        /// Model to use (ollama only)
        #[arg(long)]
        model: Option<String>,
    },
}

/// Extractor choice for CLI.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExtractorChoice {
    /// Rule-based extraction, text only
    #[default]
    Heuristic,
    /// Ollama local models (requires Ollama running)
    Ollama,
    /// Mock extractor for testing
    Mock,
}

impl std::str::FromStr for ExtractorChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "heuristic" | "rules" => Ok(ExtractorChoice::Heuristic),
            "ollama" | "local" => Ok(ExtractorChoice::Ollama),
            "mock" => Ok(ExtractorChoice::Mock),
            _ => Err(format!(
                "Unknown extractor: {}. Use heuristic, ollama, or mock.",
                s
            )),
        }
    }
}

impl std::fmt::Display for ExtractorChoice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractorChoice::Heuristic => write!(f, "heuristic"),
            ExtractorChoice::Ollama => write!(f, "ollama"),
            ExtractorChoice::Mock => write!(f, "mock"),
        }
    }
}
