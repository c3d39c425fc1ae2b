//! Demo data source
//!
//! Serves a fixed, deterministic payload so the dashboard can be tried
//! without a running transactions API. The balance is aggregated from the
//! demo transactions so the cards always agree with the table.

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::domain::result::Result;
use crate::domain::{Balance, Category, Transaction, TransactionKind, TransactionsPayload};
use crate::ports::TransactionSource;

/// (id, title, kind, value in cents, created_at, category id, category title)
const DEMO_TRANSACTIONS: &[(&str, &str, TransactionKind, i64, &str, &str, &str)] = &[
    (
        "demo-tx-001",
        "Monthly salary",
        TransactionKind::Income,
        650000,
        "2020-05-01T09:00:00.000Z",
        "demo-cat-salary",
        "Salary",
    ),
    (
        "demo-tx-002",
        "Apartment rent",
        TransactionKind::Outcome,
        180000,
        "2020-05-02T12:30:00.000Z",
        "demo-cat-housing",
        "Housing",
    ),
    (
        "demo-tx-003",
        "Website hosting",
        TransactionKind::Outcome,
        5990,
        "2020-05-04T18:10:00.000Z",
        "demo-cat-services",
        "Services",
    ),
    (
        "demo-tx-004",
        "Freelance landing page",
        TransactionKind::Income,
        120000,
        "2020-05-08T15:45:00.000Z",
        "demo-cat-freelance",
        "Freelance",
    ),
    (
        "demo-tx-005",
        "Groceries",
        TransactionKind::Outcome,
        43215,
        "2020-05-09T10:05:00.000Z",
        "demo-cat-food",
        "Food",
    ),
    (
        "demo-tx-006",
        "Ice cream",
        TransactionKind::Outcome,
        1800,
        "2020-05-09T16:20:00.000Z",
        "demo-cat-food",
        "Food",
    ),
    (
        "demo-tx-007",
        "Internet plan",
        TransactionKind::Outcome,
        11990,
        "2020-05-12T08:00:00.000Z",
        "demo-cat-services",
        "Services",
    ),
    (
        "demo-tx-008",
        "Sold old bicycle",
        TransactionKind::Income,
        75000,
        "2020-05-15T19:30:00.000Z",
        "demo-cat-sales",
        "Sales",
    ),
];

/// Generate the demo transactions, in display order
pub fn generate_demo_transactions() -> Vec<Transaction> {
    DEMO_TRANSACTIONS
        .iter()
        .map(
            |&(id, title, kind, cents, created_at, category_id, category_title)| Transaction {
                id: id.to_string(),
                title: title.to_string(),
                kind,
                amount: Decimal::new(cents, 2),
                created_at: created_at.to_string(),
                category: Category {
                    id: category_id.to_string(),
                    title: category_title.to_string(),
                },
            },
        )
        .collect()
}

/// Full demo response body
pub fn demo_payload() -> TransactionsPayload {
    let transactions = generate_demo_transactions();
    let balance = Balance::from_transactions(&transactions);
    TransactionsPayload {
        transactions,
        balance,
    }
}

/// Demo transaction source
#[derive(Debug, Default)]
pub struct DemoTransactionSource;

impl DemoTransactionSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TransactionSource for DemoTransactionSource {
    fn name(&self) -> &str {
        "demo"
    }

    async fn fetch_transactions(&self) -> Result<TransactionsPayload> {
        Ok(demo_payload())
    }
}
