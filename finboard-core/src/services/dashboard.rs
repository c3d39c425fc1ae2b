//! Dashboard service - fetch, transform and hold the dashboard view

use crate::domain::result::Result;
use crate::domain::{CurrencyFormat, DashboardView};
use crate::ports::TransactionSource;

/// Owns the current `DashboardView` and refreshes it from a source
///
/// The view starts in its empty pre-fetch state. Each successful `load`
/// replaces it as a whole; a failed load leaves it untouched.
pub struct DashboardService {
    source: Box<dyn TransactionSource>,
    currency: CurrencyFormat,
    view: DashboardView,
}

impl DashboardService {
    pub fn new(source: Box<dyn TransactionSource>, currency: CurrencyFormat) -> Self {
        Self {
            source,
            currency,
            view: DashboardView::default(),
        }
    }

    /// Name of the underlying source, for event logs
    pub fn source_name(&self) -> &str {
        self.source.name()
    }

    /// Current view (empty until the first successful load)
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Fetch once and replace the view with the transformed payload
    pub async fn load(&mut self) -> Result<&DashboardView> {
        let payload = self.source.fetch_transactions().await?;
        let view = DashboardView::from_payload(&payload, &self.currency)?;
        self.view = view;
        Ok(&self.view)
    }
}
