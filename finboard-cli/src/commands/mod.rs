//! CLI command implementations

pub mod dashboard;
pub mod demo;
pub mod logs;
pub mod setup;

use std::path::PathBuf;

use anyhow::{Context, Result};
use finboard_core::ports::TransactionSource;
use finboard_core::{FinboardContext, LogEvent, LoggingService};

/// Get the logging service for CLI operations
///
/// Returns None if logging fails to initialize (shouldn't block operations)
pub fn get_logger() -> Option<LoggingService> {
    let finboard_dir = get_finboard_dir();
    std::fs::create_dir_all(&finboard_dir).ok()?;
    LoggingService::new(&finboard_dir, env!("CARGO_PKG_VERSION")).ok()
}

/// Record an event, ignoring any errors (logging should never break the app)
pub fn log_event(logger: &Option<LoggingService>, event: LogEvent) {
    if let Some(l) = logger {
        let _ = l.record(&event);
    }
}

/// Get the finboard directory from FINBOARD_DIR or default to ~/.finboard
pub fn get_finboard_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("FINBOARD_DIR") {
        PathBuf::from(dir)
    } else {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".finboard")
    }
}

fn ensure_finboard_dir() -> Result<PathBuf> {
    let finboard_dir = get_finboard_dir();
    std::fs::create_dir_all(&finboard_dir)
        .with_context(|| format!("Failed to create finboard directory: {:?}", finboard_dir))?;
    Ok(finboard_dir)
}

/// Get a context wired to the configured source
pub fn get_context() -> Result<FinboardContext> {
    let finboard_dir = ensure_finboard_dir()?;
    FinboardContext::new(&finboard_dir).context("Failed to initialize finboard context")
}

/// Get a context wired to an explicit source
pub fn get_context_with_source(source: Box<dyn TransactionSource>) -> Result<FinboardContext> {
    let finboard_dir = ensure_finboard_dir()?;
    FinboardContext::with_source(&finboard_dir, source)
        .context("Failed to initialize finboard context")
}
