//! HTTP endpoint subsystem.
//!
//! # Data Flow
//! ```text
//! TCP/TLS connection
//!     → server.rs (Axum router, middleware stack)
//!     → request.rs (request ID assigned and propagated)
//!     → SkillPipeline::handle_bytes
//!     → response envelope JSON (always 200)
//! ```

pub mod request;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use server::HttpServer;
