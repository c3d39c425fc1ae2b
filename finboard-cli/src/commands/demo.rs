//! Demo command - manage demo mode

use anyhow::Result;
use clap::Subcommand;
use colored::Colorize;

use super::get_finboard_dir;
use crate::output;
use finboard_core::services::DemoService;

#[derive(Subcommand)]
pub enum DemoCommands {
    /// Enable demo mode
    #[command(name = "on")]
    On,
    /// Disable demo mode
    #[command(name = "off")]
    Off,
    /// Show demo mode status
    Status,
}

pub fn run(command: Option<DemoCommands>) -> Result<()> {
    let finboard_dir = get_finboard_dir();
    std::fs::create_dir_all(&finboard_dir)?;
    let demo_service = DemoService::new(&finboard_dir);

    match command {
        Some(DemoCommands::On) => {
            demo_service.enable()?;
            output::success("Demo mode enabled");
            println!("Run 'fb dashboard' to see the sample transactions.");
        }
        Some(DemoCommands::Off) => {
            demo_service.disable()?;
            output::warning("Demo mode disabled");
        }
        Some(DemoCommands::Status) | None => {
            if demo_service.is_enabled()? {
                println!("Demo mode is {}", "ON".green());
            } else {
                println!("Demo mode is {}", "OFF".yellow());
            }
        }
    }

    Ok(())
}
