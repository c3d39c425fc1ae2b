//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for external dependencies. The dashboard
//! depends only on these traits, not on concrete implementations.

mod transaction_source;

pub use transaction_source::TransactionSource;
