//! Find or Lose - binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::Parser;
use find_or_lose::headless::HeadlessEvent;
use fol_app::config::{default_config_path, init_config_file, load_validated_settings};
use fol_core::prelude::*;

/// Find or Lose - spot the odd image out before your score decays
#[derive(Parser, Debug)]
#[command(name = "findorlose")]
#[command(about = "Spot the odd image out before your score decays", long_about = None)]
struct Args {
    /// Path to config.toml
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write a default config file and exit
    #[arg(long)]
    init_config: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(default_config_path);

    if args.init_config {
        if init_config_file(&config_path)? {
            eprintln!("Created {}", config_path.display());
        } else {
            eprintln!("Config already exists: {}", config_path.display());
        }
        return Ok(());
    }

    color_eyre::install().map_err(|e| Error::terminal(e.to_string()))?;
    fol_core::logging::init().context("Failed to initialise logging")?;

    let settings = match load_validated_settings(&config_path) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            HeadlessEvent::error(e.to_string(), e.is_fatal()).emit();
            eprintln!("Config file: {}", config_path.display());
            return Err(e);
        }
    };

    find_or_lose::run_headless(settings).await
}
