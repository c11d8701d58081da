//! Groundwork CLI - deployment configuration tooling
//!
//! This binary validates deployment configuration files by running the real
//! bootstrap sequence against them (with in-process cache tiers standing in
//! for the cluster) and inspecting what it produces.

use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;
mod error;

/// Bootstrap validation and topology inspection for Groundwork deployments.
#[derive(Debug, Parser)]
#[command(name = "groundwork", version, about)]
struct Cli {
    /// Enable debug-level logging regardless of the config's debug flag.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Validate a configuration file by running the full bootstrap
    Check {
        /// Path to the INI configuration file
        config: std::path::PathBuf,
    },

    /// Print the resolved database topology
    Topology {
        /// Path to the INI configuration file
        config: std::path::PathBuf,
    },

    /// Print the coerced typed configuration
    Config {
        /// Path to the INI configuration file
        config: std::path::PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    groundwork::telemetry::init(cli.verbose);

    let result = match cli.command {
        Commands::Check { config } => commands::check::run(&config),
        Commands::Topology { config } => commands::topology::run(&config),
        Commands::Config { config } => commands::config::run(&config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
