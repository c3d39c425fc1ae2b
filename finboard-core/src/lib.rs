//! Finboard Core - personal finance dashboard logic
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: API entities, the dashboard display model, formatting rules
//! - **ports**: Trait definitions for external dependencies (TransactionSource)
//! - **services**: Use-case orchestration (dashboard loading, demo mode, event log)
//! - **adapters**: Concrete sources (HTTP API, demo data, saved response file)

pub mod domain;
pub mod ports;
pub mod services;
pub mod adapters;
pub mod config;
mod log_migrations;

use std::path::Path;

use anyhow::Result;

use config::Config;
use ports::TransactionSource;
use services::DashboardService;

// Re-export commonly used types at crate root
pub use domain::{
    Balance, Category, DashboardView, DisplayBalance, DisplayTransaction, Transaction,
    TransactionKind, TransactionsPayload,
};
pub use domain::result::Error;
pub use services::{LogEvent, LoggingService};

/// Main context for Finboard operations
///
/// Holds the loaded configuration and a dashboard service wired to the
/// source the configuration selects.
pub struct FinboardContext {
    pub config: Config,
    pub dashboard_service: DashboardService,
}

impl FinboardContext {
    /// Create a context using the configured source (demo data or HTTP API)
    pub fn new(finboard_dir: &Path) -> Result<Self> {
        let config = Config::load(finboard_dir)?;
        let source = adapters::source_from_config(&config)?;
        Ok(Self::from_parts(config, source))
    }

    /// Create a context with an explicit source (e.g. a saved response file)
    pub fn with_source(finboard_dir: &Path, source: Box<dyn TransactionSource>) -> Result<Self> {
        let config = Config::load(finboard_dir)?;
        Ok(Self::from_parts(config, source))
    }

    fn from_parts(config: Config, source: Box<dyn TransactionSource>) -> Self {
        let dashboard_service = DashboardService::new(source, config.currency.format());
        Self {
            config,
            dashboard_service,
        }
    }
}
