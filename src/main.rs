//! Curious Facts skill server.
//!
//! # Architecture Overview
//!
//! ```text
//!     Voice platform                ┌──────────────────────────────────────────────┐
//!     POST / (envelope JSON)        │                 SKILL SERVER                  │
//!     ──────────────────────────────┼─▶ http ──▶ pipeline ──▶ routing ──▶ handlers  │
//!                                   │             │  ▲                     │        │
//!                                   │             ▼  │                     ▼        │
//!                                   │        interceptors          localization     │
//!     ◀─────────────────────────────┼── response envelope JSON        + facts      │
//!                                   │                                               │
//!                                   │  config · observability · lifecycle · net    │
//!                                   └──────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use curious_facts_skill::config::{load_config, SkillConfig};
use curious_facts_skill::lifecycle::{self, Shutdown};
use curious_facts_skill::observability::logging;

#[derive(Parser)]
#[command(name = "curious-facts-skill")]
#[command(about = "Bilingual Curious Facts voice skill server", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => match load_config(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        },
        None => SkillConfig::default(),
    };

    if let Err(e) = logging::init_logging(&config.observability) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    match run(config).await {
        Ok(()) => {
            tracing::info!("Shutdown complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Fatal startup error");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: SkillConfig) -> Result<(), Box<dyn std::error::Error>> {
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        tls = config.listener.tls.is_some(),
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let pipeline = Arc::new(lifecycle::build_pipeline(&config)?);
    lifecycle::start_metrics(&config.observability)?;

    let shutdown = Shutdown::new();
    lifecycle::spawn_signal_listener(shutdown.clone());

    lifecycle::serve(config, pipeline, &shutdown).await?;
    Ok(())
}
