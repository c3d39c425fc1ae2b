//! Transaction source port
//!
//! Defines the interface for reading the transaction list and balance
//! aggregate (the REST API, demo data, a saved response file, etc.)

use async_trait::async_trait;

use crate::domain::result::Result;
use crate::domain::TransactionsPayload;

/// Source of the dashboard's data
///
/// One call to `fetch_transactions` corresponds to one `GET /transactions`.
/// The DashboardService uses this trait without knowing where the data
/// comes from, which lets tests substitute an in-memory source.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Source name (e.g., "http", "demo", "file"); used in event logs
    fn name(&self) -> &str;

    /// Fetch the full transaction list and the balance aggregate
    async fn fetch_transactions(&self) -> Result<TransactionsPayload>;
}
