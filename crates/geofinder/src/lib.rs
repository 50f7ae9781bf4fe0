//! Geofinder search SDK umbrella crate
//!
//! Re-exports the public surface of the SDK and provides the
//! [`ServiceProvider`] that wires the façade, local record layers, and
//! feedback telemetry together.

pub mod provider;

pub use provider::{SdkError, ServiceProvider};

// Domain model
pub use geofinder_core::{
    Address, AddressFormatStyle, BoundingBox, Coordinate, DefaultLocationProvider, FavoriteRecord,
    HistoryRecord, HistoryType, IndexableRecord, LocationProvider, RecordLayer, RequestOptions,
    ReverseGeoOptions, SearchOptions, SearchQueryType, SearchResult, SearchResultMetadata,
    SearchResultType, SearchSuggestion,
};

// Façade
pub use geofinder_engine::{
    ProcessedResponse, SearchEngine, SearchEngineDelegate, SearchError, SearchResponse,
};

// Engine boundary
pub use geofinder_native::{CoreSearchEngine, CoreSearchResponse, CoreSearchResult};

// Persistence
pub use geofinder_storage::{FavoritesDataProvider, HistoryDataProvider, PersistentService};

// Telemetry
pub use geofinder_telemetry::{
    EventsManager, FeedbackEvent, FeedbackManager, FeedbackReason, RawFeedbackEvent, TelemetrySink,
};

// Configuration
pub use geofinder_config::{ApplicationConfig, ConfigError};

// Environment bootstrap
pub use geofinder_common::initialize_environment;
