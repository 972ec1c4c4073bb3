//! Main application entry point (bot binary).
//!
//! A thin wrapper around the `craftrom_bot` library that handles:
//! - Environment variable loading (.env file)
//! - Command-line argument parsing
//! - Logger initialization
//!
//! All bot behavior lives in the library crate.

use anyhow::{Context, Result};
use clap::Parser;
use std::process;

use craftrom_bot::initialization::init_logger_with;
use craftrom_bot::{run_bot, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // TELEGRAM_TOKEN usually comes from .env; look next to the executable
    // when the working directory has none
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let config = Config::parse();

    let log_level = config.log_level.clone();
    let log_format = config.log_format.clone();
    init_logger_with(log_level.into(), log_format).context("Failed to initialize logger")?;

    if let Err(e) = run_bot(config).await {
        eprintln!("craftrom_bot error: {:#}", e);
        process::exit(1);
    }
    Ok(())
}
