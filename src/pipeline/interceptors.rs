//! Request and response interceptors.
//!
//! Request interceptors run before routing and may populate the
//! [`RequestContext`]; response interceptors observe the final response.
//! Both run in the order they were added to the pipeline.

use std::sync::Arc;

use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::error::Result;
use crate::localization::LocaleTable;
use crate::pipeline::context::RequestContext;

pub trait RequestInterceptor: Send + Sync + std::fmt::Debug {
    fn process(&self, envelope: &RequestEnvelope, ctx: &mut RequestContext) -> Result<()>;
}

/// `envelope` is `None` when the request could not be parsed.
pub trait ResponseInterceptor: Send + Sync + std::fmt::Debug {
    fn process(
        &self,
        envelope: Option<&RequestEnvelope>,
        response: &ResponseEnvelope,
    ) -> Result<()>;
}

/// Resolves the request's locale and binds the localizer into the context.
#[derive(Debug, Clone)]
pub struct LocalizationInterceptor {
    table: Arc<LocaleTable>,
}

impl LocalizationInterceptor {
    pub fn new(table: Arc<LocaleTable>) -> Self {
        Self { table }
    }
}

impl RequestInterceptor for LocalizationInterceptor {
    fn process(&self, envelope: &RequestEnvelope, ctx: &mut RequestContext) -> Result<()> {
        let localizer = self.table.resolve(envelope.locale());
        tracing::debug!(
            locale = envelope.locale(),
            language = localizer.language(),
            "Localization bound"
        );
        ctx.bind_localizer(localizer);
        Ok(())
    }
}

/// Logs the incoming request body.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingRequestInterceptor;

impl RequestInterceptor for LoggingRequestInterceptor {
    fn process(&self, envelope: &RequestEnvelope, _ctx: &mut RequestContext) -> Result<()> {
        match serde_json::to_string(&envelope.request) {
            Ok(raw) => tracing::info!(
                request_id = %envelope.request.request_id,
                request = %raw,
                "Incoming request"
            ),
            Err(e) => tracing::warn!(error = %e, "Could not serialize incoming request"),
        }
        Ok(())
    }
}

/// Logs the outgoing response envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoggingResponseInterceptor;

impl ResponseInterceptor for LoggingResponseInterceptor {
    fn process(
        &self,
        envelope: Option<&RequestEnvelope>,
        response: &ResponseEnvelope,
    ) -> Result<()> {
        let request_id = envelope.map(|e| e.request.request_id.as_str()).unwrap_or("unknown");
        match serde_json::to_string(response) {
            Ok(raw) => {
                tracing::info!(request_id = %request_id, response = %raw, "Outgoing response")
            }
            Err(e) => tracing::warn!(error = %e, "Could not serialize outgoing response"),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::ResponseBuilder;

    #[test]
    fn test_localization_interceptor_binds() {
        let table = Arc::new(LocaleTable::builtin("en").unwrap());
        let interceptor = LocalizationInterceptor::new(table);
        let mut ctx = RequestContext::new();
        assert!(ctx.localizer().is_err());

        interceptor
            .process(&RequestEnvelope::launch("es-AR"), &mut ctx)
            .unwrap();
        assert_eq!(ctx.localizer().unwrap().language(), "es");
    }

    #[test]
    fn test_logging_interceptors_never_fail() {
        let envelope = RequestEnvelope::intent("GetFact", "en-US");
        let mut ctx = RequestContext::new();
        assert!(LoggingRequestInterceptor.process(&envelope, &mut ctx).is_ok());

        let response = ResponseBuilder::new().speak("hi").get_response();
        assert!(LoggingResponseInterceptor.process(Some(&envelope), &response).is_ok());
        assert!(LoggingResponseInterceptor.process(None, &response).is_ok());
    }
}
