#![forbid(unsafe_code)]

//! Perdura CLI
//!
//! Checks Perdura configuration files and prints the declared endpoint
//! manifest.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use perdura_config::ConfigFile;
use std::path::PathBuf;

/// Perdura configuration tool
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Validate a configuration file
    Check {
        /// Path to the configuration file (falls back to PERDURA_CONFIG,
        /// then ./perdura.toml)
        path: Option<PathBuf>,
    },
    /// Print the declared endpoint manifest as JSON
    Manifest {
        /// Path to the configuration file (falls back to PERDURA_CONFIG,
        /// then ./perdura.toml)
        path: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    match args.command {
        Command::Check { path } => {
            let config =
                ConfigFile::load(path.as_deref()).context("configuration check failed")?;
            for entry in &config.services {
                tracing::info!(
                    service = %entry.options.name,
                    handlers = entry.handlers.len(),
                    "service validated"
                );
            }
            tracing::info!(
                services = config.services.len(),
                identity_keys = config.settings.identity_keys.len(),
                "configuration OK"
            );
        }
        Command::Manifest { path } => {
            let config = ConfigFile::load(path.as_deref())?;
            let manifest = config.manifest()?;
            println!("{}", serde_json::to_string_pretty(&manifest)?);
        }
    }

    Ok(())
}
