//! Application state for the web server.

use std::sync::Arc;

use labscribe::LabPipeline;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// The pipeline, with its extractor attached.
    pub pipeline: Arc<LabPipeline>,
}

impl AppState {
    /// Create new application state.
    pub fn new(pipeline: Arc<LabPipeline>) -> Self {
        Self { pipeline }
    }

    /// Name of the configured extractor (for display).
    pub fn extractor_name(&self) -> &str {
        self.pipeline.extractor_name().unwrap_or("none")
    }
}
