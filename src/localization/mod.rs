//! Localization subsystem.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     resources/strings.toml (or localization.strings_path)
//!     → table.rs (parse, check fallback present)
//!     → LocaleTable (immutable, Arc-shared)
//!
//! Per request:
//!     request.locale ("es-MX")
//!     → base language ("es")
//!     → Localizer (resolved bundle + fallback bundle)
//!     → handlers call text()/list()
//! ```
//!
//! # Design Decisions
//! - A missing fallback bundle is a startup error, so resolution never fails
//! - Keys absent from the resolved bundle are looked up in the fallback
//! - The resolved Localizer is owned by the request context, never global

pub mod bundle;
pub mod table;

pub use bundle::{fill_template, BundleValue, Translation, TranslationBundle};
pub use table::{base_language, resolve, CatalogError, LocaleTable, Localizer};

/// Catalog keys used by the handlers.
pub mod keys {
    pub const WELCOME_MESSAGE: &str = "WELCOME_MESSAGE";
    pub const REFLECTOR_MESSAGE: &str = "REFLECTOR_MESSAGE";
    pub const FACT_PREFIX: &str = "GET_FRASES_MSG";
    pub const FACT_SUFFIX: &str = "GET_FRASES_MSG2";
    pub const FACTS: &str = "MESSI_FACTS";
}
