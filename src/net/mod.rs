//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! listener.tls present?
//!     yes → tls.rs (load PEM cert/key) → axum-server rustls acceptor
//!     no  → plain tokio TcpListener
//!     → Hand off to HTTP layer
//! ```
//!
//! # Design Decisions
//! - TLS is optional and handled transparently
//! - Missing certificate files fail startup rather than the first handshake

pub mod tls;

pub use tls::load_tls_config;
