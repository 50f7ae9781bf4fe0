//! Centralized configuration management for the Geofinder SDK
//!
//! Configuration follows a simple hierarchy:
//! 1. Safe defaults (defined as constants)
//! 2. Environment variable overrides (`GEOFINDER_*`)
//! 3. Runtime validation

pub mod error;

pub use error::{ConfigError, ConfigResult};

use std::path::PathBuf;

use geofinder_core::SearchOptions;

// =============================================================================
// SAFE DEFAULTS - Work for any environment (dev, staging, prod, test)
// =============================================================================

// Engine Configuration
const DEFAULT_ENDPOINT: &str = "https://api.geofinder.dev/search/v1/";
const DEFAULT_USER_AGENT: &str = "search-sdk-rust";
const DEFAULT_RESULT_LIMIT: usize = 10; // Matches the server-side page size
const DEFAULT_LANGUAGE: &str = "en";

// Telemetry Configuration
const DEFAULT_TELEMETRY_ENABLED: bool = false; // Opt-in

/// Core configuration for the entire SDK
///
/// All settings have safe defaults; only the access token is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ApplicationConfig {
    /// Engine connection configuration
    pub engine: EngineConfig,

    /// Telemetry and feedback configuration
    pub telemetry: TelemetryConfig,

    /// Local record storage configuration
    pub storage: StorageConfig,
}

/// Engine connection configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EngineConfig {
    /// Access token identifying the host application
    pub access_token: String,

    /// Base endpoint of the search backend
    pub endpoint: String,

    /// User agent reported with every request
    pub user_agent: String,

    /// Default maximum number of results per search
    pub default_limit: usize,

    /// Default response language
    pub language: String,
}

/// Telemetry and feedback configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TelemetryConfig {
    /// Whether feedback events are submitted at all
    pub enabled: bool,
}

/// Local record storage configuration
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StorageConfig {
    /// Directory for record files; platform default when unset
    pub directory: Option<PathBuf>,
}

impl ApplicationConfig {
    /// Configuration with safe defaults and the given access token
    pub fn with_access_token(access_token: &str) -> Self {
        Self {
            engine: EngineConfig {
                access_token: access_token.to_string(),
                endpoint: DEFAULT_ENDPOINT.to_string(),
                user_agent: DEFAULT_USER_AGENT.to_string(),
                default_limit: DEFAULT_RESULT_LIMIT,
                language: DEFAULT_LANGUAGE.to_string(),
            },
            telemetry: TelemetryConfig {
                enabled: DEFAULT_TELEMETRY_ENABLED,
            },
            storage: StorageConfig { directory: None },
        }
    }

    /// Configuration from `GEOFINDER_*` environment variables over defaults
    ///
    /// # Errors
    ///
    /// Fails when `GEOFINDER_ACCESS_TOKEN` is unset or an override does not
    /// parse.
    pub fn from_env() -> ConfigResult<Self> {
        let access_token =
            std::env::var("GEOFINDER_ACCESS_TOKEN").map_err(|_| ConfigError::MissingField {
                field: "GEOFINDER_ACCESS_TOKEN".to_string(),
            })?;

        let mut config = Self::with_access_token(&access_token);

        if let Ok(endpoint) = std::env::var("GEOFINDER_ENDPOINT") {
            config.engine.endpoint = endpoint;
        }
        if let Ok(user_agent) = std::env::var("GEOFINDER_USER_AGENT") {
            config.engine.user_agent = user_agent;
        }
        if let Ok(language) = std::env::var("GEOFINDER_LANGUAGE") {
            config.engine.language = language;
        }
        if let Ok(limit) = std::env::var("GEOFINDER_DEFAULT_LIMIT") {
            config.engine.default_limit =
                limit.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "GEOFINDER_DEFAULT_LIMIT".to_string(),
                    reason: format!("not a positive integer: {limit}"),
                })?;
        }
        if let Ok(enabled) = std::env::var("GEOFINDER_TELEMETRY_ENABLED") {
            config.telemetry.enabled =
                enabled.parse().map_err(|_| ConfigError::InvalidValue {
                    field: "GEOFINDER_TELEMETRY_ENABLED".to_string(),
                    reason: format!("not a boolean: {enabled}"),
                })?;
        }
        if let Ok(directory) = std::env::var("GEOFINDER_STORAGE_DIR") {
            config.storage.directory = Some(PathBuf::from(directory));
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Fails on an empty access token, a non-HTTP endpoint, or a zero
    /// result limit.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.engine.access_token.is_empty() {
            return Err(ConfigError::MissingField {
                field: "engine.access_token".to_string(),
            });
        }
        if !self.engine.endpoint.starts_with("http") {
            return Err(ConfigError::InvalidValue {
                field: "engine.endpoint".to_string(),
                reason: format!("not an HTTP(S) URL: {}", self.engine.endpoint),
            });
        }
        if self.engine.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.default_limit".to_string(),
                reason: "limit must be positive".to_string(),
            });
        }
        Ok(())
    }
}

impl EngineConfig {
    /// Default per-search options derived from this configuration
    pub fn default_search_options(&self) -> SearchOptions {
        SearchOptions {
            limit: Some(self.default_limit),
            languages: Some(vec![self.language.clone()]),
            ..SearchOptions::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ApplicationConfig, ConfigError};

    #[test]
    fn test_defaults_validate() {
        let config = ApplicationConfig::with_access_token("test-token");
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.default_limit, 10);
        assert!(!config.telemetry.enabled);
    }

    #[test]
    fn test_empty_access_token_is_rejected() {
        let config = ApplicationConfig::with_access_token("");
        assert_eq!(
            config.validate(),
            Err(ConfigError::MissingField {
                field: "engine.access_token".to_string()
            })
        );
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let mut config = ApplicationConfig::with_access_token("test-token");
        config.engine.endpoint = "ftp://example.com".to_string();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { field, .. }) if field == "engine.endpoint"
        ));
    }

    #[test]
    fn test_zero_limit_is_rejected() {
        let mut config = ApplicationConfig::with_access_token("test-token");
        config.engine.default_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_search_options() {
        let config = ApplicationConfig::with_access_token("test-token");
        let options = config.engine.default_search_options();
        assert_eq!(options.limit, Some(10));
        assert_eq!(options.languages, Some(vec!["en".to_string()]));
        assert!(options.countries.is_none());
    }

    #[test]
    fn test_from_env_requires_access_token() {
        // SAFETY: no other test in this binary touches the environment
        unsafe { std::env::remove_var("GEOFINDER_ACCESS_TOKEN") };
        assert_eq!(
            ApplicationConfig::from_env(),
            Err(ConfigError::MissingField {
                field: "GEOFINDER_ACCESS_TOKEN".to_string()
            })
        );
    }
}
