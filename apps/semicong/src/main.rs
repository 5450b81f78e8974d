//! # Semicong - Semigroup Congruence Coordinator
//!
//! The main binary for semicong.
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────┐
//! │             apps/semicong (THE BINARY)             │
//! │                                                    │
//! │  ┌──────────┐  ┌──────────────┐  ┌──────────────┐  │
//! │  │   CLI    │  │ Presentation │  │   Timeout    │  │
//! │  │  (clap)  │  │ (toml/json)  │  │ Ctrl+C tokio │  │
//! │  └────┬─────┘  └──────┬───────┘  └──────┬───────┘  │
//! │       └───────────────┼─────────────────┘          │
//! │                       ▼                            │
//! │              ┌─────────────────┐                   │
//! │              │  semicong-core  │                   │
//! │              │   (THE LOGIC)   │                   │
//! │              └─────────────────┘                   │
//! └────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! semicong check -f monogenic.toml
//! semicong run -f monogenic.toml --timeout-ms 5000
//! semicong equals -f monogenic.toml --lhs aa --rhs aaaaa
//! semicong class-index -f monogenic.toml -w aaaaaaa --json-mode
//! ```

use clap::Parser;
use semicong::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

#[tokio::main]
async fn main() {
    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Initialize tracing. SEMICONG_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("SEMICONG_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let default_filter = if cli.verbose {
        "semicong=debug,semicong_core=debug"
    } else {
        "semicong=info,semicong_core=info"
    };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter.into());

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

    // Display startup banner
    if !cli.quiet && !cli.json_mode {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli).await {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the semicong startup banner.
fn print_banner() {
    eprintln!(
        r#"
  semicong v{}
  Semigroup congruences: rewrite, enumerate, decide.
"#,
        env!("CARGO_PKG_VERSION")
    );
}
