//! Geofinder feedback telemetry crate
//!
//! Builds feedback events out of domain objects (results, suggestions,
//! user records), merges them with engine-provided event templates into a
//! fixed attribute vocabulary, and submits them to a pluggable telemetry
//! sink.

pub mod error;
pub mod events;
pub mod feedback;
pub mod manager;
pub mod raw;

// Re-export main types
pub use error::{TelemetryError, TelemetryResult};
pub use events::{EventsManager, TelemetryEvent, TelemetryEventKind, TelemetrySink};
pub use feedback::{FeedbackEvent, FeedbackReason, NO_ADDRESS_PLACEHOLDER};
pub use manager::FeedbackManager;
pub use raw::RawFeedbackEvent;

// Re-export test utilities when test-utils feature is enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
