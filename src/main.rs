//! dwnldr - terminal control panel for a dwnldr file-share backend
//!
//! This is the binary entry point. All logic lives in the library.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use dwnldr::headless::CommandsArgs;
use dwnldr_app::config::{ensure_config_exists, load_settings};
use dwnldr_core::prelude::*;

/// dwnldr - terminal control panel for a LAN file-share backend
#[derive(Parser, Debug)]
#[command(name = "dwnldr", version)]
#[command(about = "Terminal control panel for the dwnldr LAN file-share backend", long_about = None)]
struct Args {
    /// Backend base URL (overrides server.url from the config file)
    #[arg(long, value_name = "URL", global = true)]
    server: Option<String>,

    /// Settings file to use instead of the default location
    #[arg(long, value_name = "PATH", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the rendered download commands and exit
    Commands(CommandsArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Some(path) = &args.config {
        ensure_config_exists(path)?;
    }

    let mut settings = load_settings(args.config.as_deref());
    if let Some(url) = args.server {
        settings.server.url = url;
    }

    match args.command {
        Some(Command::Commands(commands)) => dwnldr::run_commands(settings, commands).await,
        None => dwnldr::run(settings).await,
    }
}
