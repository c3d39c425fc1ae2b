//! Finboard CLI - personal finance dashboard in your terminal

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Parser, Subcommand};

mod commands;
mod output;

use commands::{dashboard, demo, logs, setup};

/// Finboard - personal finance dashboard in your terminal
#[derive(Parser)]
#[command(name = "fb", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show balance cards and the transaction table
    Dashboard {
        /// Output format (table, json, csv)
        #[arg(long, default_value = "table", value_parser = ["table", "json", "csv"])]
        format: String,
        /// Output as JSON (shorthand for --format json)
        #[arg(long)]
        json: bool,
        /// Read a saved /transactions response instead of calling the API
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Configure the transactions API
    Setup {
        /// API base URL (prompted if omitted)
        url: Option<String>,
        /// Display currency (BRL, USD, EUR)
        #[arg(long)]
        currency: Option<String>,
        /// Request timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// Manage demo mode
    Demo {
        #[command(subcommand)]
        command: Option<demo::DemoCommands>,
    },

    /// View and manage the event log
    Logs {
        #[command(subcommand)]
        command: logs::LogsCommands,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            output::error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Dashboard { format, json, file } => {
            let fmt = if json { "json".to_string() } else { format };
            dashboard::run(&fmt, file)
        }
        Commands::Setup { url, currency, timeout } => setup::run(url, currency, timeout),
        Commands::Demo { command } => demo::run(command),
        Commands::Logs { command } => logs::run(command),
    }
}
