//! Dashboard command - fetch transactions and render the summary cards and table

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use colored::Colorize;
use comfy_table::{Cell, Table};
use serde::Serialize;

use finboard_core::adapters::file::FileTransactionSource;
use finboard_core::domain::{CardKind, DashboardView, SummaryCard, TABLE_HEADERS};
use finboard_core::{DisplayTransaction, LogEvent, TransactionKind};

use super::{get_context, get_context_with_source, get_logger, log_event};
use crate::output;

#[derive(Serialize)]
struct DashboardJson<'a> {
    cards: [SummaryCard; 3],
    transactions: &'a [DisplayTransaction],
}

pub fn run(format: &str, file: Option<PathBuf>) -> Result<()> {
    let logger = get_logger();
    log_event(&logger, LogEvent::command("dashboard"));

    let mut ctx = match file {
        Some(path) => get_context_with_source(Box::new(FileTransactionSource::new(path)))?,
        None => get_context()?,
    };
    let source = ctx.dashboard_service.source_name().to_string();

    let runtime = tokio::runtime::Runtime::new().context("Failed to start async runtime")?;
    let spinner = if format == "table" {
        output::spinner("Loading transactions...")
    } else {
        indicatif::ProgressBar::hidden()
    };
    let result = runtime
        .block_on(ctx.dashboard_service.load())
        .map(|view| view.clone());
    spinner.finish_and_clear();

    let view = match result {
        Ok(view) => {
            log_event(&logger, LogEvent::loaded(&source));
            view
        }
        Err(e) => {
            log_event(&logger, LogEvent::load_failed(&source, &e));
            return Err(e).context("Failed to load dashboard");
        }
    };

    match format {
        "json" => {
            let body = DashboardJson {
                cards: view.cards(),
                transactions: &view.transactions,
            };
            println!("{}", serde_json::to_string_pretty(&body)?);
        }
        "csv" => {
            let stdout = std::io::stdout();
            write_csv(&view, stdout.lock())?;
        }
        _ => print_dashboard(&view),
    }

    Ok(())
}

fn print_dashboard(view: &DashboardView) {
    println!("{}", "Finboard".bold());
    println!();
    println!("{}", render_cards(view));
    println!();

    if view.transactions.is_empty() {
        output::warning("No transactions yet.");
        return;
    }

    println!("{}", render_transactions(view));
    println!();
    println!("{} transaction(s)", view.transactions.len());
}

/// Income, outcome and total cards side by side
pub fn render_cards(view: &DashboardView) -> Table {
    let cards = view.cards();
    let mut table = output::create_table();
    table.set_header(cards.iter().map(|c| Cell::new(c.label)).collect::<Vec<_>>());
    table.add_row(cards.iter().map(card_cell).collect::<Vec<_>>());
    table
}

fn card_cell(card: &SummaryCard) -> Cell {
    let value = match card.kind {
        CardKind::Income => card.value.green().to_string(),
        CardKind::Outcome => card.value.red().to_string(),
        CardKind::Total => card.value.bold().to_string(),
    };
    Cell::new(value)
}

/// Transaction table: Title, Price, Category, Date
pub fn render_transactions(view: &DashboardView) -> Table {
    let mut table = output::create_table();
    table.set_header(TABLE_HEADERS.to_vec());

    for row in view.rows() {
        let price = match row.kind {
            TransactionKind::Outcome => row.price.red().to_string(),
            TransactionKind::Income => row.price.green().to_string(),
        };
        table.add_row(vec![row.title, price, row.category, row.date]);
    }

    table
}

fn write_csv<W: Write>(view: &DashboardView, out: W) -> Result<()> {
    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(TABLE_HEADERS)?;
    for row in view.rows() {
        writer.write_record([row.title, row.price, row.category, row.date])?;
    }
    writer.flush()?;
    Ok(())
}
