//! Logs command - view and manage the event log

use anyhow::{bail, Result};
use chrono::{TimeZone, Utc};
use clap::Subcommand;
use colored::Colorize;
use dialoguer::Confirm;

use super::get_finboard_dir;
use crate::output::{create_table, format_size};
use finboard_core::services::logging::now_ms;
use finboard_core::services::LogEntry;
use finboard_core::LoggingService;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

#[derive(Subcommand)]
pub enum LogsCommands {
    /// Show recent log entries
    List {
        /// Number of entries to show
        #[arg(short, long, default_value = "50")]
        limit: usize,
        /// Show only errors
        #[arg(long)]
        errors: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Clear old log entries
    Clear {
        /// Delete logs older than N days
        #[arg(long, default_value = "30")]
        older_than_days: u64,
        /// Skip confirmation prompt
        #[arg(long, short = 'f')]
        force: bool,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show log statistics and database path
    Stats {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

pub fn run(command: LogsCommands) -> Result<()> {
    let finboard_dir = get_finboard_dir();
    std::fs::create_dir_all(&finboard_dir)?;
    let service = LoggingService::new(&finboard_dir, env!("CARGO_PKG_VERSION"))?;

    match command {
        LogsCommands::List { limit, errors, json } => list(&service, limit, errors, json),
        LogsCommands::Clear {
            older_than_days,
            force,
            json,
        } => clear(&service, older_than_days, force, json),
        LogsCommands::Stats { json } => stats(&service, json),
    }
}

fn list(service: &LoggingService, limit: usize, errors_only: bool, json: bool) -> Result<()> {
    let entries = if errors_only {
        service.get_errors(limit)?
    } else {
        service.get_recent(limit)?
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No log entries found.");
        return Ok(());
    }

    let mut table = create_table();
    table.set_header(vec!["Time", "Event", "Context", "Error"]);
    for entry in &entries {
        let error = match &entry.error_message {
            Some(msg) => msg.red().to_string(),
            None => String::new(),
        };
        table.add_row(vec![
            format_timestamp(entry.timestamp),
            entry.event.clone(),
            context_label(entry),
            error,
        ]);
    }
    println!("{}", table);

    Ok(())
}

fn clear(service: &LoggingService, older_than_days: u64, force: bool, json: bool) -> Result<()> {
    if !force && !json {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete logs older than {} days?", older_than_days))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let cutoff = cutoff_ms(now_ms(), older_than_days)?;
    let deleted = service.delete_before(cutoff)?;

    if json {
        println!("{}", serde_json::json!({ "deleted": deleted }));
    } else {
        println!("Deleted {} log entries", deleted);
    }
    Ok(())
}

fn stats(service: &LoggingService, json: bool) -> Result<()> {
    let total = service.count()?;
    let errors = service.count_errors()?;
    let db_path = service.db_path();
    let size_bytes = std::fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);

    if json {
        println!(
            "{}",
            serde_json::json!({
                "total_entries": total,
                "error_count": errors,
                "database_path": db_path.to_string_lossy(),
                "database_size_bytes": size_bytes
            })
        );
    } else {
        println!("{}", "Event Log".bold());
        println!("  Total entries: {}", total);
        println!("  Errors: {}", errors);
        println!("  Database: {}", db_path.display());
        println!("  Size: {}", format_size(size_bytes));
    }
    Ok(())
}

/// Timestamp `days` days before `now_ms`
fn cutoff_ms(now_ms: i64, days: u64) -> Result<i64> {
    let span = i64::try_from(days)
        .ok()
        .and_then(|d| d.checked_mul(DAY_MS))
        .and_then(|span| now_ms.checked_sub(span));
    match span {
        Some(cutoff) => Ok(cutoff),
        None => bail!("--older-than-days {} is out of range", days),
    }
}

/// "command, source" for the Context column
fn context_label(entry: &LogEntry) -> String {
    [entry.command.as_deref(), entry.source.as_deref()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(", ")
}

fn format_timestamp(timestamp_ms: i64) -> String {
    Utc.timestamp_millis_opt(timestamp_ms)
        .single()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| timestamp_ms.to_string())
}
