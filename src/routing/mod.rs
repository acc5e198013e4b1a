//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! RequestEnvelope (request type, intent name)
//!     → router.rs (ordered scan)
//!     → matcher.rs (evaluate match conditions)
//!     → Return: first matching handler's response, or NoHandlerMatched
//!
//! Registry construction (at startup):
//!     (name, matcher, handler) entries in table order
//!     → Freeze as immutable HandlerRegistry
//! ```
//!
//! # Design Decisions
//! - Entries fixed at startup, immutable at runtime
//! - Deterministic: same input always matches same entry
//! - First match wins (table order, not most specific)

pub mod matcher;
pub mod router;

pub use matcher::{canonical_intent_name, IntentMatcher, Matcher, RequestTypeMatcher};
pub use router::{HandlerInput, HandlerRegistry, RegistryBuilder, RequestHandler};
