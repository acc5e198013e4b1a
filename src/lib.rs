//! Curious Facts voice skill.
//!
//! A bilingual (English/Spanish) voice-assistant skill that answers launch,
//! intent, and session-ended requests, served over HTTP(S).

// Skill core
pub mod envelope;
pub mod error;
pub mod facts;
pub mod handlers;
pub mod localization;
pub mod pipeline;
pub mod routing;

// Hosting
pub mod config;
pub mod http;
pub mod net;

// Cross-cutting concerns
pub mod lifecycle;
pub mod observability;

pub use config::schema::SkillConfig;
pub use envelope::{RequestEnvelope, ResponseEnvelope};
pub use error::{ErrorKind, SkillError};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use pipeline::SkillPipeline;
