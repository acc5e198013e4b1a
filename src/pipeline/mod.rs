//! Dispatch pipeline: the single entry point for a skill request.
//!
//! # Data Flow
//! ```text
//! raw JSON
//!     → parse RequestEnvelope
//!     → request interceptors (localization, request logging)
//!     → HandlerRegistry::dispatch (first match)
//!     → response interceptors (response logging)
//!     → ResponseEnvelope
//!
//! Any failure above (including a panic)
//!     → error boundary: fixed apology + reprompt
//!     → response interceptors still observe it
//! ```
//!
//! # Design Decisions
//! - Exactly one response per call; errors never escape `handle`
//! - The resolved localizer lives in a per-request context, never in shared
//!   state
//! - Interceptor order is fixed when the pipeline is built

pub mod context;
pub mod interceptors;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::time::Instant;

use serde::Deserialize;
use serde_json::Value;

use crate::config::SkillSettings;
use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::error::{ErrorKind, Result, SkillError};
use crate::facts::{RandomSource, ThreadRandom};
use crate::handlers::{error_response, skill_registry};
use crate::localization::LocaleTable;
use crate::observability::metrics;
use crate::routing::{HandlerInput, HandlerRegistry};

pub use context::RequestContext;
pub use interceptors::{
    LocalizationInterceptor, LoggingRequestInterceptor, LoggingResponseInterceptor,
    RequestInterceptor, ResponseInterceptor,
};

/// Orchestrates interceptors, routing, and the error boundary.
#[derive(Debug)]
pub struct SkillPipeline {
    registry: HandlerRegistry,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    rng: Box<dyn RandomSource>,
    settings: SkillSettings,
}

/// Configures a [`SkillPipeline`] before it starts serving.
///
/// The localization and logging interceptors always come first; extra
/// interceptors run after them in the order added.
#[derive(Debug)]
pub struct PipelineBuilder {
    table: Arc<LocaleTable>,
    registry: Option<HandlerRegistry>,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
    rng: Box<dyn RandomSource>,
    settings: SkillSettings,
}

impl PipelineBuilder {
    pub fn registry(mut self, registry: HandlerRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn rng(mut self, rng: impl RandomSource + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    pub fn settings(mut self, settings: SkillSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Box::new(interceptor));
        self
    }

    pub fn response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptors.push(Box::new(interceptor));
        self
    }

    pub fn build(self) -> SkillPipeline {
        let mut request_interceptors: Vec<Box<dyn RequestInterceptor>> = vec![
            Box::new(LocalizationInterceptor::new(self.table)),
            Box::new(LoggingRequestInterceptor),
        ];
        request_interceptors.extend(self.request_interceptors);

        let mut response_interceptors: Vec<Box<dyn ResponseInterceptor>> =
            vec![Box::new(LoggingResponseInterceptor)];
        response_interceptors.extend(self.response_interceptors);

        SkillPipeline {
            registry: self.registry.unwrap_or_else(skill_registry),
            request_interceptors,
            response_interceptors,
            rng: self.rng,
            settings: self.settings,
        }
    }
}

impl SkillPipeline {
    pub fn builder(table: Arc<LocaleTable>) -> PipelineBuilder {
        PipelineBuilder {
            table,
            registry: None,
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
            rng: Box::new(ThreadRandom),
            settings: SkillSettings::default(),
        }
    }

    /// The standard skill: built-in handler table, thread RNG.
    pub fn new(table: Arc<LocaleTable>, settings: SkillSettings) -> Self {
        Self::builder(table).settings(settings).build()
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Answer a raw JSON request body.
    pub fn handle_raw(&self, raw: Value) -> ResponseEnvelope {
        let start = Instant::now();
        match RequestEnvelope::deserialize(&raw) {
            Ok(envelope) => self.handle_at(&envelope, start),
            Err(e) => {
                log_unparsed(raw.to_string().as_bytes());
                self.recover(None, SkillError::from(e), start)
            }
        }
    }

    /// Answer an HTTP request body. Bytes that are not JSON get the apology.
    pub fn handle_bytes(&self, body: &[u8]) -> ResponseEnvelope {
        let start = Instant::now();
        match serde_json::from_slice::<RequestEnvelope>(body) {
            Ok(envelope) => self.handle_at(&envelope, start),
            Err(e) => {
                log_unparsed(body);
                self.recover(None, SkillError::from(e), start)
            }
        }
    }

    /// Answer a parsed request envelope.
    pub fn handle(&self, envelope: &RequestEnvelope) -> ResponseEnvelope {
        self.handle_at(envelope, Instant::now())
    }

    fn handle_at(&self, envelope: &RequestEnvelope, start: Instant) -> ResponseEnvelope {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_handle(envelope)))
            .unwrap_or_else(|payload| Err(SkillError::Panicked(panic_message(payload.as_ref()))));

        match outcome {
            Ok(response) => {
                metrics::record_duration("ok", start);
                response
            }
            Err(error) => self.recover(Some(envelope), error, start),
        }
    }

    fn try_handle(&self, envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        let mut ctx = RequestContext::new();
        for interceptor in &self.request_interceptors {
            interceptor.process(envelope, &mut ctx)?;
        }

        let input = HandlerInput {
            envelope,
            localizer: ctx.localizer()?,
            rng: &*self.rng,
            settings: &self.settings,
        };
        let mut response = self.registry.dispatch(&input)?;
        self.stamp(&mut response);

        for interceptor in &self.response_interceptors {
            interceptor.process(Some(envelope), &response)?;
        }
        Ok(response)
    }

    /// Error boundary.
    fn recover(
        &self,
        envelope: Option<&RequestEnvelope>,
        error: SkillError,
        start: Instant,
    ) -> ResponseEnvelope {
        let kind = error.kind();
        let request_id = envelope
            .map(|e| e.request.request_id.as_str())
            .unwrap_or("unknown");

        if kind == ErrorKind::NoHandlerMatched {
            tracing::error!(
                request_id = %request_id,
                kind = %kind,
                error = %error,
                "Handler table has no entry for this request; check the registry"
            );
        } else {
            tracing::error!(
                request_id = %request_id,
                kind = %kind,
                error = %error,
                "Error handled"
            );
        }
        metrics::record_error(kind);

        let mut response = error_response();
        self.stamp(&mut response);

        for interceptor in &self.response_interceptors {
            let outcome =
                panic::catch_unwind(AssertUnwindSafe(|| interceptor.process(envelope, &response)))
                    .unwrap_or_else(|payload| {
                        Err(SkillError::Panicked(panic_message(payload.as_ref())))
                    });
            if let Err(e) = outcome {
                tracing::warn!(
                    request_id = %request_id,
                    error = %e,
                    "Response interceptor failed on error response"
                );
            }
        }

        metrics::record_duration("error", start);
        response
    }

    fn stamp(&self, response: &mut ResponseEnvelope) {
        response.user_agent = self.settings.user_agent.clone();
    }
}

/// Longest prefix of an unparseable body written to the log.
const MAX_LOGGED_BODY: usize = 1024;

/// Bodies that never become an envelope still get their request logged.
fn log_unparsed(body: &[u8]) {
    tracing::info!(
        bytes = body.len(),
        request = %truncate_body(body),
        "Incoming request (unparseable)"
    );
}

fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.chars().count() <= MAX_LOGGED_BODY {
        return text.into_owned();
    }
    let mut truncated: String = text.chars().take(MAX_LOGGED_BODY).collect();
    truncated.push_str("...");
    truncated
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    payload
        .downcast_ref::<&str>()
        .map(|s| s.to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "non-string panic payload".to_string())
}
