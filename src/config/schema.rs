//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the skill
//! server. All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the skill server.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SkillConfig {
    /// Listener configuration (bind address, TLS).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// String catalog and fallback language.
    pub localization: LocalizationConfig,

    /// Values handlers read at request time.
    pub skill: SkillSettings,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,

    /// Optional TLS configuration.
    pub tls: Option<TlsConfig>,

    /// Maximum requests processed concurrently (backpressure).
    pub max_concurrent_requests: usize,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
            tls: None,
            max_concurrent_requests: 1_000,
            max_body_bytes: 256 * 1024,
        }
    }
}

/// TLS configuration for the listener.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TlsConfig {
    /// Path to certificate file (PEM).
    pub cert_path: String,

    /// Path to private key file (PEM).
    pub key_path: String,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Total time allowed for one request in seconds.
    pub request_secs: u64,

    /// How long shutdown waits for in-flight requests, in seconds.
    pub shutdown_grace_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            request_secs: 8,
            shutdown_grace_secs: 10,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Log output format ("pretty" or "json").
    pub log_format: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Localization configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LocalizationConfig {
    /// Base language used when a request's language has no bundle.
    pub fallback_language: String,

    /// Optional TOML catalog replacing the built-in strings.
    pub strings_path: Option<String>,
}

impl Default for LocalizationConfig {
    fn default() -> Self {
        Self {
            fallback_language: "en".to_string(),
            strings_path: None,
        }
    }
}

/// Per-request settings handed to handlers.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SkillSettings {
    /// Reprompt spoken after a fact.
    pub fact_reprompt: String,

    /// Value stamped into every response's `userAgent`.
    pub user_agent: Option<String>,
}

impl Default for SkillSettings {
    fn default() -> Self {
        Self {
            fact_reprompt: "Would you like to hear another curiosity about Messi?".to_string(),
            user_agent: Some(format!("curious-facts-skill/{}", env!("CARGO_PKG_VERSION"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config: SkillConfig = toml::from_str("").unwrap();
        assert_eq!(config.listener.bind_address, "0.0.0.0:8080");
        assert_eq!(config.localization.fallback_language, "en");
        assert!(config.listener.tls.is_none());
    }

    #[test]
    fn test_default_fact_reprompt() {
        let config: SkillConfig = toml::from_str("").unwrap();
        assert_eq!(
            config.skill.fact_reprompt,
            "Would you like to hear another curiosity about Messi?"
        );

        let config: SkillConfig = toml::from_str(
            r#"
            [skill]
            fact_reprompt = "dd a reprompt if you want to keep the session open for the user to respond"
            "#,
        )
        .unwrap();
        assert!(config.skill.fact_reprompt.starts_with("dd a reprompt"));
    }

    #[test]
    fn test_partial_sections() {
        let config: SkillConfig = toml::from_str(
            r#"
            [listener]
            bind_address = "127.0.0.1:9000"

            [listener.tls]
            cert_path = "cert.pem"
            key_path = "key.pem"

            [skill]
            fact_reprompt = "Another one?"
            "#,
        )
        .unwrap();

        assert_eq!(config.listener.bind_address, "127.0.0.1:9000");
        assert_eq!(config.listener.max_body_bytes, 256 * 1024);
        assert_eq!(config.listener.tls.unwrap().key_path, "key.pem");
        assert_eq!(config.skill.fact_reprompt, "Another one?");
        assert!(config.skill.user_agent.is_some());
    }
}
