//! Geofinder domain model crate
//!
//! Shared domain types for the search SDK: coordinates and viewports,
//! addresses, search results and suggestions, user records, and the request
//! option types that travel with every engine call.

pub mod address;
pub mod geo;
pub mod options;
pub mod provider;
pub mod record;
pub mod result;
pub mod suggestion;

// Re-export main types
pub use address::{Address, AddressFormatStyle};
pub use geo::{BoundingBox, Coordinate};
pub use options::{RequestOptions, ReverseGeoOptions, SearchOptions, SearchQueryType};
pub use provider::{DefaultLocationProvider, HistoryRecorder, LocationProvider, RecordLayer};
pub use record::{FavoriteRecord, HistoryRecord, HistoryType, IndexableRecord};
pub use result::{
    AddressKind, ResponseContext, RoutablePoint, SearchResult, SearchResultMetadata,
    SearchResultType,
};
pub use suggestion::{
    CategorySuggestion, QuerySuggestion, RecordSuggestion, SearchSuggestion, ServerSuggestion,
};
