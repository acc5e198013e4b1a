//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with the skill and health routes
//! - Wire up middleware (request ID, tracing, timeout, body and concurrency limits)
//! - Bind the server to a plain or TLS listener
//! - Hand request bodies to the skill pipeline
//! - Stop accepting when the shutdown signal fires

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Bytes,
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::limit::GlobalConcurrencyLimitLayer;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::SkillConfig;
use crate::envelope::ResponseEnvelope;
use crate::http::request::{self, propagate_request_id_layer, set_request_id_layer};
use crate::pipeline::SkillPipeline;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<SkillPipeline>,
}

/// HTTP server hosting the skill.
pub struct HttpServer {
    router: Router,
    config: SkillConfig,
}

impl HttpServer {
    pub fn new(config: SkillConfig, pipeline: Arc<SkillPipeline>) -> Self {
        let router = Self::build_router(&config, AppState { pipeline });
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &SkillConfig, state: AppState) -> Router {
        Router::new()
            .route("/", post(skill_handler))
            .route("/health", get(health_handler))
            .with_state(state)
            .layer(GlobalConcurrencyLimitLayer::new(config.listener.max_concurrent_requests))
            .layer(RequestBodyLimitLayer::new(config.listener.max_body_bytes))
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The configured router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve plain HTTP until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Serve HTTPS until `shutdown` fires, then drain for the configured grace period.
    pub async fn run_tls(
        self,
        addr: SocketAddr,
        tls: RustlsConfig,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        tracing::info!(address = %addr, "HTTPS server starting");

        let handle = axum_server::Handle::new();
        let grace = Duration::from_secs(self.config.timeouts.shutdown_grace_secs);
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!(grace_secs = grace.as_secs(), "HTTPS server draining");
            drain.graceful_shutdown(Some(grace));
        });

        axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await?;

        tracing::info!("HTTPS server stopped");
        Ok(())
    }

    pub fn config(&self) -> &SkillConfig {
        &self.config
    }
}

/// Skill invocation. Always answers 200 with a response envelope.
async fn skill_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Json<ResponseEnvelope> {
    tracing::debug!(
        request_id = %request::request_id(&headers),
        bytes = body.len(),
        "Skill invocation"
    );
    Json(state.pipeline.handle_bytes(&body))
}

async fn health_handler() -> &'static str {
    "ok"
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SkillSettings;
    use crate::envelope::RequestEnvelope;
    use crate::handlers::ERROR_SPEECH;
    use crate::localization::LocaleTable;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    fn server() -> HttpServer {
        let table = Arc::new(LocaleTable::builtin("en").unwrap());
        let pipeline = Arc::new(SkillPipeline::new(table, SkillSettings::default()));
        HttpServer::new(SkillConfig::default(), pipeline)
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = server()
            .router()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(request::X_REQUEST_ID));
    }

    #[tokio::test]
    async fn test_post_launch() {
        let body = serde_json::to_vec(&RequestEnvelope::launch("en-US")).unwrap();
        let response = server()
            .router()
            .oneshot(
                Request::post("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["version"], "1.0");
        assert_eq!(json["response"]["shouldEndSession"], false);
        assert!(json["response"]["outputSpeech"]["ssml"]
            .as_str()
            .unwrap()
            .starts_with("<speak>"));
    }

    #[tokio::test]
    async fn test_garbage_body_gets_apology() {
        let response = server()
            .router()
            .oneshot(Request::post("/").body(Body::from("hello")).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(
            json["response"]["outputSpeech"]["ssml"],
            format!("<speak>{}</speak>", ERROR_SPEECH)
        );
    }

    #[tokio::test]
    async fn test_caller_request_id_is_echoed() {
        let response = server()
            .router()
            .oneshot(
                Request::get("/health")
                    .header(request::X_REQUEST_ID, "req-42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.headers()[request::X_REQUEST_ID], "req-42");
    }
}
