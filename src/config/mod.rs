//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SkillConfig (validated, immutable)
//!     → sections handed to subsystems at startup
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require a restart
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_locale_table, parse_config, ConfigError};
pub use schema::LocalizationConfig;
pub use schema::ListenerConfig;
pub use schema::ObservabilityConfig;
pub use schema::SkillConfig;
pub use schema::SkillSettings;
pub use schema::TimeoutConfig;
pub use schema::TlsConfig;
