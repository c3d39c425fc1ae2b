//! Setup command - point finboard at a transactions API

use anyhow::Result;
use colored::Colorize;
use dialoguer::Input;

use super::get_finboard_dir;
use crate::output;
use finboard_core::config::Config;
use finboard_core::domain::Currency;

pub fn run(url: Option<String>, currency: Option<String>, timeout: Option<u64>) -> Result<()> {
    let finboard_dir = get_finboard_dir();
    std::fs::create_dir_all(&finboard_dir)?;
    let mut config = Config::load(&finboard_dir)?;

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Transactions API base URL")
            .with_initial_text(config.api_base_url.clone())
            .interact_text()?,
    };
    config.set_base_url(&url)?;

    if let Some(code) = currency {
        config.currency = Currency::from_code(&code)?;
    }
    if let Some(secs) = timeout {
        if secs == 0 {
            anyhow::bail!("Timeout must be at least 1 second");
        }
        config.timeout_secs = secs;
    }

    config.save(&finboard_dir)?;

    output::success("Transactions API configured");
    println!("  URL: {}", config.api_base_url);
    println!("  Currency: {}", config.currency.code());
    println!("  Timeout: {}s", config.timeout_secs);
    if config.demo_mode {
        println!(
            "{}",
            "Demo mode is on; run 'fb demo off' to use this API.".yellow()
        );
    }

    Ok(())
}
