mod commands;

use anyhow::Result;
use clap::Parser;
use retrofe_config_core::{RetroFePaths, Repository};
use std::path::PathBuf;
use tracing::Level as TraceLevel;
use tracing::debug;
use tracing_subscriber::FmtSubscriber;

/// Edit the settings tree of a RetroFE installation.
#[derive(Debug, Parser)]
#[command(name = "retrofe-config", version)]
struct Cli {
    /// RetroFE root directory (defaults to $RETROFE_PATH, then the executable's directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> Result<()> {
    let log_level = match std::env::var("LOG_LEVEL")
        .unwrap_or_else(|_| "info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => TraceLevel::TRACE,
        "debug" => TraceLevel::DEBUG,
        "warn" => TraceLevel::WARN,
        "error" => TraceLevel::ERROR,
        _ => TraceLevel::INFO,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let paths = match cli.root {
        Some(root) => RetroFePaths::new(root),
        None => RetroFePaths::from_env(),
    };
    debug!(root = %paths.root().display(), "using settings root");

    commands::run(&Repository::new(paths), cli.command)
}
