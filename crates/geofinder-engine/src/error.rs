use thiserror::Error;

use geofinder_core::ReverseGeoOptions;
use geofinder_native::CoreError;

/// Search-level error types surfaced through the delegate or returned
/// directly from one-shot operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Engine-reported failure, preserving the engine's error triple
    #[error("search failed: {message} (code {code}, domain {domain})")]
    Generic {
        code: i32,
        domain: String,
        message: String,
    },

    /// The engine delivered no payload, or one we cannot decode
    #[error("unable to process the search response")]
    ResponseProcessingFailed,

    /// Reverse geocoding failed; carries the originating options
    #[error("reverse geocoding failed: {reason}")]
    ReverseGeocodingFailed {
        reason: Box<SearchError>,
        options: ReverseGeoOptions,
    },
}

impl From<CoreError> for SearchError {
    fn from(error: CoreError) -> Self {
        Self::Generic {
            code: error.code,
            domain: error.domain,
            message: error.message,
        }
    }
}
