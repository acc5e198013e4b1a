//! Errors raised while answering a single skill request.
//!
//! Every variant is caught by the pipeline's error boundary and turned into
//! the apology response. [`SkillError::kind`] collapses the variants onto the
//! three kinds that are reported in logs and metrics.

use thiserror::Error;

/// Result alias for request-path operations.
pub type Result<T> = std::result::Result<T, SkillError>;

/// Reported error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A translation key is absent from the resolved and fallback bundles.
    MissingKey,
    /// No registry entry matched the request.
    NoHandlerMatched,
    /// Anything else that failed inside an interceptor or handler.
    HandlerExecutionFailure,
}

impl ErrorKind {
    /// Stable label used for log fields and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::MissingKey => "missing_key",
            ErrorKind::NoHandlerMatched => "no_handler_matched",
            ErrorKind::HandlerExecutionFailure => "handler_execution_failure",
        }
    }
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Failure while processing one request.
#[derive(Debug, Error)]
pub enum SkillError {
    #[error("translation key `{key}` not found for language `{language}` or the fallback")]
    MissingKey { key: String, language: String },

    #[error("translation key `{key}` is not a {expected}")]
    UnexpectedValue { key: String, expected: &'static str },

    #[error("fact list `{key}` is empty")]
    EmptyFactList { key: String },

    #[error("no localization bound to the request context")]
    LocalizationUnbound,

    #[error("no handler matched request type `{request_type}` (intent: {intent:?})")]
    NoHandlerMatched {
        request_type: String,
        intent: Option<String>,
    },

    #[error("invalid request envelope: {0}")]
    InvalidEnvelope(#[from] serde_json::Error),

    #[error("interceptor `{name}` failed: {reason}")]
    Interceptor { name: &'static str, reason: String },

    #[error("request processing panicked: {0}")]
    Panicked(String),
}

impl SkillError {
    /// Map onto the reported error kind.
    pub fn kind(&self) -> ErrorKind {
        match self {
            SkillError::MissingKey { .. } => ErrorKind::MissingKey,
            SkillError::NoHandlerMatched { .. } => ErrorKind::NoHandlerMatched,
            SkillError::UnexpectedValue { .. }
            | SkillError::EmptyFactList { .. }
            | SkillError::LocalizationUnbound
            | SkillError::InvalidEnvelope(_)
            | SkillError::Interceptor { .. }
            | SkillError::Panicked(_) => ErrorKind::HandlerExecutionFailure,
        }
    }
}
