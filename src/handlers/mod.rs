//! Skill handlers and the handler table.
//!
//! # Handler Table
//! ```text
//! 1. LaunchRequest              → welcome + reprompt
//! 2. Intent GetFact (Frases)    → random fact + fixed reprompt
//! 3. Intent HelloWorld          → "Hello World!"
//! 4. Intent Help                → fixed help + reprompt
//! 5. Intent Cancel | Stop       → "Goodbye!", session ends
//! 6. Intent Fallback            → fixed apology + reprompt
//! 7. SessionEndedRequest        → empty response (logged)
//! 8. IntentRequest (catch-all)  → reflects the intent name
//! -  error boundary             → see pipeline
//! ```
//!
//! Order matters: entry 8 overlaps every intent entry above it.

pub mod skill;

pub use skill::{
    error_response, skill_registry, ERROR_SPEECH, FALLBACK_SPEECH, GOODBYE_SPEECH,
    HELLO_WORLD_SPEECH, HELP_SPEECH,
};
