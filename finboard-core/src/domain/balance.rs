//! Balance aggregate and the `/transactions` response body

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::transaction::{deserialize_amount, Transaction, TransactionKind};

/// Summed income, outcome and net total across all transactions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Balance {
    #[serde(deserialize_with = "deserialize_amount")]
    pub income: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub outcome: Decimal,
    #[serde(deserialize_with = "deserialize_amount")]
    pub total: Decimal,
}

impl Balance {
    pub fn new(income: Decimal, outcome: Decimal, total: Decimal) -> Self {
        Self {
            income,
            outcome,
            total,
        }
    }

    /// Aggregate a transaction list: total = income - outcome
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let (income, outcome) = transactions.iter().fold(
            (Decimal::ZERO, Decimal::ZERO),
            |(income, outcome), tx| match tx.kind {
                TransactionKind::Income => (income + tx.amount, outcome),
                TransactionKind::Outcome => (income, outcome + tx.amount),
            },
        );
        Self::new(income, outcome, income - outcome)
    }
}

/// Body of a successful `GET /transactions` response
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionsPayload {
    pub transactions: Vec<Transaction>,
    pub balance: Balance,
}
