use thiserror::Error;

/// Telemetry-specific error types
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// The engine-provided event template does not parse to a JSON object
    #[error("engine event template is not a JSON object")]
    IncorrectEventTemplate,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Specialized Result type for telemetry operations
pub type TelemetryResult<T> = std::result::Result<T, TelemetryError>;
