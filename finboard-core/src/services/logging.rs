//! Event log - what the CLI did and whether the dashboard loaded
//!
//! Events go to logs.duckdb in the finboard directory. Only the command,
//! the source name and error messages are stored; transaction titles,
//! amounts and categories never are.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use duckdb::{params, Connection};
use serde::Serialize;

use crate::log_migrations::LOG_MIGRATIONS;

/// Current unix timestamp in milliseconds
pub fn now_ms() -> i64 {
    Utc::now().timestamp_millis()
}

/// Something worth recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// A CLI command started
    CommandExecuted { command: String },
    /// A dashboard load succeeded against `source` ("http", "demo", "file")
    DashboardLoaded { source: String },
    /// A dashboard load failed; the previous view was kept
    DashboardLoadFailed { source: String, error: String },
}

impl LogEvent {
    pub fn command(command: impl Into<String>) -> Self {
        LogEvent::CommandExecuted {
            command: command.into(),
        }
    }

    pub fn loaded(source: impl Into<String>) -> Self {
        LogEvent::DashboardLoaded {
            source: source.into(),
        }
    }

    pub fn load_failed(source: impl Into<String>, error: impl ToString) -> Self {
        LogEvent::DashboardLoadFailed {
            source: source.into(),
            error: error.to_string(),
        }
    }

    /// Stored event name
    pub fn name(&self) -> &'static str {
        match self {
            LogEvent::CommandExecuted { .. } => "command_executed",
            LogEvent::DashboardLoaded { .. } => "dashboard_loaded",
            LogEvent::DashboardLoadFailed { .. } => "dashboard_load_failed",
        }
    }

    fn columns(&self) -> (Option<&str>, Option<&str>, Option<&str>) {
        match self {
            LogEvent::CommandExecuted { command } => (Some(command.as_str()), None, None),
            LogEvent::DashboardLoaded { source } => (None, Some(source.as_str()), None),
            LogEvent::DashboardLoadFailed { source, error } => {
                (None, Some(source.as_str()), Some(error.as_str()))
            }
        }
    }
}

/// A stored log row
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub id: i64,
    pub timestamp: i64,
    pub app_version: String,
    pub platform: String,
    pub event: String,
    pub command: Option<String>,
    pub source: Option<String>,
    pub error_message: Option<String>,
}

#[derive(Clone, Copy)]
enum EntryFilter {
    All,
    Errors,
}

impl EntryFilter {
    fn where_clause(self) -> &'static str {
        match self {
            EntryFilter::All => "",
            EntryFilter::Errors => "WHERE error_message IS NOT NULL",
        }
    }
}

pub struct LoggingService {
    conn: Connection,
    db_path: PathBuf,
    app_version: String,
}

impl LoggingService {
    /// Open (or create) logs.duckdb and bring its schema up to date
    pub fn new(finboard_dir: &Path, app_version: impl Into<String>) -> Result<Self> {
        let db_path = finboard_dir.join("logs.duckdb");
        let conn = Connection::open(&db_path)
            .with_context(|| format!("Failed to open {}", db_path.display()))?;

        let service = Self {
            conn,
            db_path,
            app_version: app_version.into(),
        };
        service.migrate()?;
        Ok(service)
    }

    fn migrate(&self) -> Result<()> {
        let Some((&(_, bootstrap), pending)) = LOG_MIGRATIONS.split_first() else {
            return Ok(());
        };
        // The first migration only creates sys_migrations and is idempotent
        self.conn.execute_batch(bootstrap)?;

        for &(name, sql) in pending {
            let applied: bool = self.conn.query_row(
                "SELECT COUNT(*) > 0 FROM sys_migrations WHERE migration_name = ?",
                [name],
                |row| row.get(0),
            )?;
            if applied {
                continue;
            }

            self.conn
                .execute_batch(sql)
                .with_context(|| format!("Log migration {} failed", name))?;
            self.conn.execute(
                "INSERT INTO sys_migrations (migration_name) VALUES (?)",
                [name],
            )?;
        }
        Ok(())
    }

    pub fn record(&self, event: &LogEvent) -> Result<()> {
        let (command, source, error) = event.columns();
        self.conn.execute(
            "INSERT INTO sys_logs \
             (timestamp, app_version, platform, event, command, source, error_message) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                now_ms(),
                &self.app_version,
                std::env::consts::OS,
                event.name(),
                command,
                source,
                error,
            ],
        )?;
        Ok(())
    }

    /// Most recent entries, newest first
    pub fn get_recent(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.entries(EntryFilter::All, limit)
    }

    /// Most recent failures, newest first
    pub fn get_errors(&self, limit: usize) -> Result<Vec<LogEntry>> {
        self.entries(EntryFilter::Errors, limit)
    }

    fn entries(&self, filter: EntryFilter, limit: usize) -> Result<Vec<LogEntry>> {
        let sql = format!(
            "SELECT id, timestamp, app_version, platform, event, command, source, error_message \
             FROM sys_logs {} ORDER BY timestamp DESC, id DESC LIMIT ?",
            filter.where_clause()
        );
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);

        let mut stmt = self.conn.prepare(&sql)?;
        let rows = stmt.query_map([limit], |row| {
            Ok(LogEntry {
                id: row.get(0)?,
                timestamp: row.get(1)?,
                app_version: row.get(2)?,
                platform: row.get(3)?,
                event: row.get(4)?,
                command: row.get(5)?,
                source: row.get(6)?,
                error_message: row.get(7)?,
            })
        })?;

        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }

    pub fn count(&self) -> Result<u64> {
        self.count_where(EntryFilter::All)
    }

    pub fn count_errors(&self) -> Result<u64> {
        self.count_where(EntryFilter::Errors)
    }

    fn count_where(&self, filter: EntryFilter) -> Result<u64> {
        let sql = format!("SELECT COUNT(*) FROM sys_logs {}", filter.where_clause());
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    /// Delete entries older than the given unix timestamp (ms)
    pub fn delete_before(&self, timestamp_ms: i64) -> Result<usize> {
        Ok(self
            .conn
            .execute("DELETE FROM sys_logs WHERE timestamp < ?", [timestamp_ms])?)
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}
