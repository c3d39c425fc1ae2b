//! Integration tests for the dashboard flow
//!
//! The transactions API is replaced by a scripted in-memory source; the
//! transform, view replacement and context wiring are real.
//!
//! Run with: cargo test --test integration_tests -- --nocapture

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rust_decimal::Decimal;
use tempfile::TempDir;

use finboard_core::domain::result::{Error, Result};
use finboard_core::domain::{Currency, CurrencyFormat};
use finboard_core::ports::TransactionSource;
use finboard_core::services::DashboardService;
use finboard_core::{
    Balance, Category, FinboardContext, Transaction, TransactionKind, TransactionsPayload,
};

// ============================================================================
// Test Helpers
// ============================================================================

/// Source that answers each fetch with the next scripted response
struct ScriptedSource {
    responses: Mutex<VecDeque<std::result::Result<TransactionsPayload, String>>>,
    calls: Arc<AtomicUsize>,
}

impl ScriptedSource {
    fn new(
        responses: Vec<std::result::Result<TransactionsPayload, String>>,
    ) -> (Self, Arc<AtomicUsize>) {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = Self {
            responses: Mutex::new(responses.into()),
            calls: Arc::clone(&calls),
        };
        (source, calls)
    }
}

#[async_trait]
impl TransactionSource for ScriptedSource {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn fetch_transactions(&self) -> Result<TransactionsPayload> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err("no scripted response left".to_string()));
        next.map_err(Error::fetch)
    }
}

fn create_transaction(id: &str, kind: TransactionKind, value: i64, created_at: &str) -> Transaction {
    Transaction {
        id: id.to_string(),
        title: format!("Transaction {}", id),
        kind,
        amount: Decimal::new(value, 0),
        created_at: created_at.to_string(),
        category: Category {
            id: "cat-1".to_string(),
            title: "Sales".to_string(),
        },
    }
}

fn create_payload(transactions: Vec<Transaction>) -> TransactionsPayload {
    TransactionsPayload {
        transactions,
        balance: Balance::new(Decimal::new(1000, 0), Decimal::new(500, 0), Decimal::new(500, 0)),
    }
}

fn create_service(
    responses: Vec<std::result::Result<TransactionsPayload, String>>,
) -> (DashboardService, Arc<AtomicUsize>) {
    let (source, calls) = ScriptedSource::new(responses);
    (
        DashboardService::new(Box::new(source), CurrencyFormat::default()),
        calls,
    )
}

// ============================================================================
// Rendering properties
// ============================================================================

#[tokio::test]
async fn test_balance_cards_show_formatted_amounts() {
    let (mut service, _) = create_service(vec![Ok(create_payload(vec![]))]);

    let view = service.load().await.unwrap();
    let values: Vec<_> = view.cards().iter().map(|c| (c.test_id, c.value.clone())).collect();

    assert_eq!(
        values,
        vec![
            ("balance-income", "R$ 1.000,00".to_string()),
            ("balance-outcome", "R$ 500,00".to_string()),
            ("balance-total", "R$ 500,00".to_string()),
        ]
    );
}

#[tokio::test]
async fn test_outcome_prefix_and_date_format() {
    let (mut service, _) = create_service(vec![Ok(create_payload(vec![
        create_transaction("out", TransactionKind::Outcome, 200, "2020-05-01T00:00:00.000Z"),
        create_transaction("in", TransactionKind::Income, 200, "2020-05-01T00:00:00.000Z"),
    ]))]);

    let rows = service.load().await.unwrap().rows();

    assert_eq!(rows[0].price, "- R$ 200,00");
    assert_eq!(rows[1].price, "R$ 200,00");
    assert!(rows.iter().all(|r| r.date == "2020/05/01"));
}

#[tokio::test]
async fn test_rows_keep_api_order() {
    let (mut service, _) = create_service(vec![Ok(create_payload(vec![
        create_transaction("3", TransactionKind::Income, 30, "2020-05-03T00:00:00Z"),
        create_transaction("1", TransactionKind::Outcome, 10, "2020-05-01T00:00:00Z"),
        create_transaction("2", TransactionKind::Income, 20, "2020-05-02T00:00:00Z"),
    ]))]);

    let ids: Vec<_> = service
        .load()
        .await
        .unwrap()
        .rows()
        .into_iter()
        .map(|r| r.id)
        .collect();

    assert_eq!(ids, vec!["3", "1", "2"]);
}

#[tokio::test]
async fn test_currency_follows_formatter() {
    let (source, _) = ScriptedSource::new(vec![Ok(create_payload(vec![]))]);
    let mut service = DashboardService::new(Box::new(source), Currency::Usd.format());

    let view = service.load().await.unwrap();
    assert_eq!(view.cards()[0].value, "$1,000.00");
}

// ============================================================================
// Load lifecycle
// ============================================================================

#[tokio::test]
async fn test_view_is_empty_until_first_load() {
    let (service, calls) = create_service(vec![Ok(create_payload(vec![]))]);

    assert!(!service.view().is_loaded());
    assert!(service.view().cards().iter().all(|c| c.value.is_empty()));
    assert!(service.view().rows().is_empty());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_each_load_fetches_exactly_once() {
    let (mut service, calls) = create_service(vec![
        Ok(create_payload(vec![])),
        Ok(create_payload(vec![])),
    ]);

    service.load().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    service.load().await.unwrap();
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_reload_replaces_instead_of_appending() {
    let first = create_payload(vec![
        create_transaction("a", TransactionKind::Income, 1, "2020-05-01T00:00:00Z"),
        create_transaction("b", TransactionKind::Income, 2, "2020-05-02T00:00:00Z"),
    ]);
    let mut second = create_payload(vec![create_transaction(
        "c",
        TransactionKind::Outcome,
        3,
        "2020-05-03T00:00:00Z",
    )]);
    second.balance = Balance::new(Decimal::ZERO, Decimal::new(3, 0), Decimal::new(-3, 0));

    let (mut service, _) = create_service(vec![Ok(first), Ok(second)]);

    assert_eq!(service.load().await.unwrap().transactions.len(), 2);

    let view = service.load().await.unwrap();
    assert_eq!(view.transactions.len(), 1);
    assert_eq!(view.transactions[0].id, "c");
    assert_eq!(view.cards()[2].value, "-R$ 3,00");
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_view() {
    let (mut service, _) = create_service(vec![
        Ok(create_payload(vec![create_transaction(
            "a",
            TransactionKind::Income,
            1,
            "2020-05-01T00:00:00Z",
        )])),
        Err("connection reset".to_string()),
    ]);

    let before = service.load().await.unwrap().clone();
    let err = service.load().await.unwrap_err();

    assert!(err.to_string().contains("connection reset"));
    assert_eq!(service.view(), &before);
}

#[tokio::test]
async fn test_invalid_date_rejects_whole_payload() {
    let (mut service, _) = create_service(vec![Ok(create_payload(vec![
        create_transaction("good", TransactionKind::Income, 1, "2020-05-01T00:00:00Z"),
        create_transaction("bad", TransactionKind::Income, 1, "01/05/2020"),
    ]))]);

    let err = service.load().await.unwrap_err();

    assert!(matches!(err, Error::Validation(_)));
    assert!(!service.view().is_loaded());
}

// ============================================================================
// Context wiring
// ============================================================================

#[tokio::test]
async fn test_context_uses_demo_source_in_demo_mode() {
    std::env::remove_var("FINBOARD_DEMO_MODE");
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("settings.json"),
        r#"{ "app": { "demoMode": true }, "display": { "currency": "USD" } }"#,
    )
    .unwrap();

    let mut ctx = FinboardContext::new(temp_dir.path()).unwrap();
    assert_eq!(ctx.dashboard_service.source_name(), "demo");

    let view = ctx.dashboard_service.load().await.unwrap();
    assert_eq!(view.cards()[0].value, "$8,450.00");
}

#[tokio::test]
async fn test_context_with_explicit_source() {
    let temp_dir = TempDir::new().unwrap();
    let (source, calls) = ScriptedSource::new(vec![Ok(create_payload(vec![]))]);

    let mut ctx = FinboardContext::with_source(temp_dir.path(), Box::new(source)).unwrap();
    ctx.dashboard_service.load().await.unwrap();

    assert_eq!(ctx.dashboard_service.source_name(), "scripted");
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}
