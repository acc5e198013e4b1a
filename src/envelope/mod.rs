//! Wire types exchanged with the voice platform.
//!
//! # Data Flow
//! ```text
//! POST / body (JSON)
//!     → request.rs (RequestEnvelope, typed view of the fields we route on)
//!     → [pipeline + handlers]
//!     → response.rs (ResponseBuilder → ResponseEnvelope)
//!     → JSON reply
//! ```
//!
//! # Design Decisions
//! - Unknown JSON fields are ignored so platform additions never break parsing
//! - The request type is kept as the raw string; routing reads it through
//!   [`RequestType`]
//! - Speech is always emitted as SSML wrapped in a single `<speak>` element

pub mod request;
pub mod response;

pub use request::{Intent, Request, RequestEnvelope, RequestType, Session};
pub use response::{OutputSpeech, Reprompt, Response, ResponseBuilder, ResponseEnvelope};
