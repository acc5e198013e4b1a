//! Fact selection.
//!
//! # Data Flow
//! ```text
//! Localizer (resolved bundle)
//!     → picker.rs (read fact list, draw index from RandomSource)
//!     → prefix + fact + suffix
//! ```
//!
//! # Design Decisions
//! - Randomness is injected so tests can pin the index
//! - The fact count comes from the bundle, never from a constant

pub mod picker;
pub mod random;

pub use picker::{fact_speech, pick_fact};
pub use random::{FixedIndex, RandomSource, ThreadRandom};
