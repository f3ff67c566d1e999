//! # Gradebook
//!
//! The main binary for the gradebook service.
//!
//! This application provides:
//! - HTTP REST API server (axum-based)
//! - CLI interface for student and grade operations
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │              apps/gradebook (THE BINARY)         │
//! │                                                  │
//! │   ┌─────────────┐          ┌─────────────┐       │
//! │   │    CLI      │          │  HTTP API   │       │
//! │   │   (clap)    │          │   (axum)    │       │
//! │   └──────┬──────┘          └──────┬──────┘       │
//! │          └────────────┬───────────┘              │
//! │                       ▼                          │
//! │              ┌────────────────┐                  │
//! │              │ gradebook-core │                  │
//! │              │  (THE LOGIC)   │                  │
//! │              └────────────────┘                  │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # Start the HTTP server
//! gradebook server --host 0.0.0.0 --port 8080
//!
//! # CLI operations
//! gradebook add-student John White G11
//! gradebook add-grade -s 1 9.5 geometry
//! gradebook report -s 1
//! ```

use clap::Parser;
use gradebook::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    let cli = cli::Cli::parse();

    // GRADEBOOK_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("GRADEBOOK_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    // RUST_LOG wins over --verbose.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| cli::default_log_filter(cli.verbose).into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }

    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the startup banner.
fn print_banner() {
    println!(
        r#"
  Gradebook v{}
  Students • Grades • Per-discipline reports
"#,
        env!("CARGO_PKG_VERSION")
    );
}
