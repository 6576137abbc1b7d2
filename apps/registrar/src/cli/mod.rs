//! # Registrar CLI Module
//!
//! This module implements the CLI interface for Registrar.
//!
//! ## Available Commands
//!
//! - `server` - Start the HTTP server
//! - `stats` - Show dashboard statistics for the demo dataset
//! - `export` - Write the demo dataset snapshot as JSON

mod commands;

use clap::{Parser, Subcommand};
use registrar_core::RegistrarError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// Registrar - Academic Records Service
///
/// An in-memory records manager for students, courses, enrollments, and
/// grades, with dashboard views over a REST interface.
#[derive(Parser, Debug)]
#[command(name = "registrar")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start HTTP server
    Server {
        /// Host to bind to (overrides config file)
        #[arg(short = 'H', long)]
        host: Option<String>,

        /// Port to bind to (overrides config file)
        #[arg(short, long)]
        port: Option<u16>,

        /// Path to a TOML config file (default: registrar.toml if present)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Start with an empty store instead of the demo dataset
        #[arg(long)]
        no_seed: bool,
    },

    /// Show dashboard statistics for the demo dataset
    Stats,

    /// Export the demo dataset snapshot as JSON
    Export {
        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Pretty-print the JSON
        #[arg(long)]
        pretty: bool,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub async fn execute(cli: Cli) -> Result<(), RegistrarError> {
    let json = cli.json;

    match cli.command {
        Some(Commands::Server {
            host,
            port,
            config,
            no_seed,
        }) => cmd_server(host, port, config.as_deref(), no_seed).await,
        Some(Commands::Export { output, pretty }) => cmd_export(&output, pretty),
        Some(Commands::Stats) | None => cmd_stats(json),
    }
}
