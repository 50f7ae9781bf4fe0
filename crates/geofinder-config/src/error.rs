use thiserror::Error;

/// Configuration-specific error types
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing required configuration field: {field}")]
    MissingField { field: String },

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Specialized Result type for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
