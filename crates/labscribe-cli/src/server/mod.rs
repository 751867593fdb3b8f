//! HTTP API for the lab report pipeline.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
