//! Adapter implementations
//!
//! Adapters implement the TransactionSource port with concrete technologies:
//! - reqwest HTTP client for the transactions REST API
//! - Demo data for trying the dashboard without an API
//! - Saved response files for offline viewing

pub mod demo;
pub mod file;
pub mod http;

#[cfg(test)]
pub mod http_mock;

use crate::config::Config;
use crate::domain::result::Result;
use crate::ports::TransactionSource;

/// Pick the source the configuration asks for: demo data or the HTTP API
pub fn source_from_config(config: &Config) -> Result<Box<dyn TransactionSource>> {
    if config.demo_mode {
        Ok(Box::new(demo::DemoTransactionSource::new()))
    } else {
        Ok(Box::new(http::HttpTransactionSource::with_timeout(
            &config.api_base_url,
            config.timeout_secs,
        )?))
    }
}
