//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the locale table and the skill pipeline from configuration
//! - Verify the handler table covers every platform request type
//! - Start the metrics exporter when enabled
//! - Bind the listener and serve until shutdown, bounded by the drain grace
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listeners start last (traffic only when ready)

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use metrics_exporter_prometheus::BuildError;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::task::JoinError;

use crate::config::{load_locale_table, ObservabilityConfig, SkillConfig};
use crate::envelope::RequestEnvelope;
use crate::http::HttpServer;
use crate::lifecycle::Shutdown;
use crate::localization::CatalogError;
use crate::net::load_tls_config;
use crate::observability::metrics;
use crate::pipeline::SkillPipeline;
use crate::routing::HandlerRegistry;

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("handler table has no entry for {0}")]
    Uncovered(String),

    #[error("invalid address `{0}`")]
    Address(String),

    #[error("Metrics exporter error: {0}")]
    Metrics(#[from] BuildError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("server task failed: {0}")]
    Join(#[from] JoinError),
}

/// Build the pipeline described by `config`.
pub fn build_pipeline(config: &SkillConfig) -> Result<SkillPipeline, StartupError> {
    let table = load_locale_table(&config.localization)?;
    tracing::info!(
        languages = ?table.languages(),
        fallback = table.fallback_language(),
        "Locale table loaded"
    );

    let pipeline = SkillPipeline::new(Arc::new(table), config.skill.clone());
    check_coverage(pipeline.registry())?;
    tracing::info!(handlers = ?pipeline.registry().names(), "Handler table ready");
    Ok(pipeline)
}

/// Every platform request type must reach some handler.
pub fn check_coverage(registry: &HandlerRegistry) -> Result<(), StartupError> {
    let samples = [
        RequestEnvelope::launch("en-US"),
        RequestEnvelope::intent("AnyIntent", "en-US"),
        RequestEnvelope::session_ended("en-US", "USER_INITIATED"),
    ];
    for sample in &samples {
        if !registry.covers(sample) {
            return Err(StartupError::Uncovered(sample.request.kind.clone()));
        }
    }
    Ok(())
}

pub fn start_metrics(config: &ObservabilityConfig) -> Result<(), StartupError> {
    if !config.metrics_enabled {
        return Ok(());
    }
    let addr: SocketAddr = config
        .metrics_address
        .parse()
        .map_err(|_| StartupError::Address(config.metrics_address.clone()))?;
    metrics::init_metrics(addr)?;
    Ok(())
}

/// Serve until `shutdown` fires, then wait at most the grace period for
/// in-flight requests.
pub async fn serve(
    config: SkillConfig,
    pipeline: Arc<SkillPipeline>,
    shutdown: &Shutdown,
) -> Result<(), StartupError> {
    let grace = Duration::from_secs(config.timeouts.shutdown_grace_secs);
    let bind = config.listener.bind_address.clone();
    let tls = config.listener.tls.clone();
    let server = HttpServer::new(config, pipeline);

    match tls {
        Some(tls) => {
            let addr: SocketAddr = bind.parse().map_err(|_| StartupError::Address(bind.clone()))?;
            let rustls = load_tls_config(&tls).await?;
            // axum-server enforces the grace period itself.
            server.run_tls(addr, rustls, shutdown.subscribe()).await?;
        }
        None => {
            let listener = TcpListener::bind(&bind).await?;
            let mut stop = shutdown.subscribe();
            let mut task = tokio::spawn(server.run(listener, shutdown.subscribe()));

            tokio::select! {
                res = &mut task => return Ok(res??),
                _ = stop.recv() => {}
            }

            match tokio::time::timeout(grace, task).await {
                Ok(res) => res??,
                Err(_) => tracing::warn!(
                    grace_secs = grace.as_secs(),
                    "Drain grace period elapsed; abandoning in-flight requests"
                ),
            }
        }
    }
    Ok(())
}
