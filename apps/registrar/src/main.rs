//! # Registrar - Academic Records Service
//!
//! The main binary for the Registrar records manager.
//!
//! This application provides:
//! - HTTP REST API server (axum-based) over the in-memory records engine
//! - CLI interface for inspection and export
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │             apps/registrar (THE BINARY)            │
//! │                                                    │
//! │   ┌─────────────┐          ┌─────────────┐         │
//! │   │   CLI       │          │   HTTP API  │         │
//! │   │  (clap)     │          │   (axum)    │         │
//! │   └──────┬──────┘          └──────┬──────┘         │
//! │          │                        │                │
//! │          └───────────┬────────────┘                │
//! │                      ▼                             │
//! │             ┌─────────────────┐                    │
//! │             │ registrar-core  │                    │
//! │             │  (THE LOGIC)    │                    │
//! │             └─────────────────┘                    │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! registrar server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! registrar stats
//! registrar export -o dataset.json --pretty
//! ```

use clap::Parser;
use registrar::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Initialize tracing — REGISTRAR_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("REGISTRAR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "registrar=info,tower_http=debug".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the Registrar startup banner.
fn print_banner() {
    println!(
        r#"
  ██████╗ ███████╗ ██████╗ ██╗███████╗████████╗██████╗  █████╗ ██████╗
  ██╔══██╗██╔════╝██╔════╝ ██║██╔════╝╚══██╔══╝██╔══██╗██╔══██╗██╔══██╗
  ██████╔╝█████╗  ██║  ███╗██║███████╗   ██║   ██████╔╝███████║██████╔╝
  ██╔══██╗██╔══╝  ██║   ██║██║╚════██║   ██║   ██╔══██╗██╔══██║██╔══██╗
  ██║  ██║███████╗╚██████╔╝██║███████║   ██║   ██║  ██║██║  ██║██║  ██║
  ╚═╝  ╚═╝╚══════╝ ╚═════╝ ╚═╝╚══════╝   ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝╚═╝  ╚═╝

  Academic Records Service v{}

  Students • Courses • Enrollments • Grades
"#,
        env!("CARGO_PKG_VERSION")
    );
}
