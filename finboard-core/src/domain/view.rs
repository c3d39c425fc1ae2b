//! Dashboard display model
//!
//! A `DashboardView` is derived from a `TransactionsPayload` by a pure
//! transform. Renderers only ever read a view; they never see raw API data.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::balance::{Balance, TransactionsPayload};
use super::format::{format_date, parse_iso, CurrencyFormat};
use super::result::{Error, Result};
use super::transaction::{Transaction, TransactionKind};

/// Column headers of the transaction table
pub const TABLE_HEADERS: [&str; 4] = ["Title", "Price", "Category", "Date"];

/// Category narrowed to what the table shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayCategory {
    pub title: String,
}

/// A transaction enriched with its formatted fields
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayTransaction {
    pub id: String,
    pub title: String,
    pub kind: TransactionKind,
    pub value: Decimal,
    pub formatted_value: String,
    pub formatted_date: String,
    pub category: DisplayCategory,
    pub created_at: DateTime<Utc>,
}

impl DisplayTransaction {
    pub fn from_transaction(tx: &Transaction, currency: &CurrencyFormat) -> Result<Self> {
        let created_at = parse_iso(&tx.created_at).map_err(|_| {
            Error::validation(format!(
                "Transaction {} has an invalid created_at: '{}'",
                tx.id, tx.created_at
            ))
        })?;

        Ok(Self {
            id: tx.id.clone(),
            title: tx.title.clone(),
            kind: tx.kind,
            value: tx.amount,
            formatted_value: currency.format(tx.amount),
            formatted_date: format_date(&created_at),
            category: DisplayCategory {
                title: tx.category.title.clone(),
            },
            created_at,
        })
    }

    /// Text of the Price cell: outcomes get a leading "- "
    pub fn price_cell(&self) -> String {
        match self.kind {
            TransactionKind::Outcome => format!("- {}", self.formatted_value),
            TransactionKind::Income => self.formatted_value.clone(),
        }
    }

    pub fn table_row(&self) -> TableRow {
        TableRow {
            id: self.id.clone(),
            kind: self.kind,
            title: self.title.clone(),
            price: self.price_cell(),
            category: self.category.title.clone(),
            date: self.formatted_date.clone(),
        }
    }
}

/// Balance aggregate as currency text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DisplayBalance {
    pub income: String,
    pub outcome: String,
    pub total: String,
}

impl DisplayBalance {
    pub fn from_balance(balance: &Balance, currency: &CurrencyFormat) -> Self {
        Self {
            income: currency.format(balance.income),
            outcome: currency.format(balance.outcome),
            total: currency.format(balance.total),
        }
    }
}

/// Which summary card a value belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Income,
    Outcome,
    Total,
}

/// One of the three summary cards above the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SummaryCard {
    /// Stable identifier, e.g. `balance-income`
    pub test_id: &'static str,
    pub label: &'static str,
    pub kind: CardKind,
    pub value: String,
}

/// One rendered line of the transaction table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TableRow {
    #[serde(skip)]
    pub id: String,
    #[serde(skip)]
    pub kind: TransactionKind,
    pub title: String,
    pub price: String,
    pub category: String,
    pub date: String,
}

/// Everything the dashboard renders
///
/// The default value is the pre-fetch state: no rows and no balance.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DashboardView {
    pub balance: Option<DisplayBalance>,
    pub transactions: Vec<DisplayTransaction>,
}

impl DashboardView {
    /// Build a view from an API payload, keeping API order
    ///
    /// Fails as a whole if any transaction cannot be formatted.
    pub fn from_payload(payload: &TransactionsPayload, currency: &CurrencyFormat) -> Result<Self> {
        let transactions = payload
            .transactions
            .iter()
            .map(|tx| DisplayTransaction::from_transaction(tx, currency))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            balance: Some(DisplayBalance::from_balance(&payload.balance, currency)),
            transactions,
        })
    }

    /// True once a payload has been applied
    pub fn is_loaded(&self) -> bool {
        self.balance.is_some()
    }

    /// Income, outcome and total cards; values are empty before the first load
    pub fn cards(&self) -> [SummaryCard; 3] {
        let balance = self.balance.clone().unwrap_or_default();
        [
            SummaryCard {
                test_id: "balance-income",
                label: "Income",
                kind: CardKind::Income,
                value: balance.income,
            },
            SummaryCard {
                test_id: "balance-outcome",
                label: "Outcome",
                kind: CardKind::Outcome,
                value: balance.outcome,
            },
            SummaryCard {
                test_id: "balance-total",
                label: "Total",
                kind: CardKind::Total,
                value: balance.total,
            },
        ]
    }

    pub fn rows(&self) -> Vec<TableRow> {
        self.transactions.iter().map(DisplayTransaction::table_row).collect()
    }
}
