//! Core domain entities
//!
//! API entities, the display model derived from them, and the formatting
//! rules between the two. Pure data and pure functions - no I/O.

mod transaction;
pub mod balance;
pub mod format;
pub mod view;
pub mod result;

pub use transaction::{Category, Transaction, TransactionKind};
pub use balance::{Balance, TransactionsPayload};
pub use format::{Currency, CurrencyFormat};
pub use view::{
    CardKind, DashboardView, DisplayBalance, DisplayCategory, DisplayTransaction, SummaryCard,
    TableRow, TABLE_HEADERS,
};
