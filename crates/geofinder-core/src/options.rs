//! Request option types that travel with every engine call

use geofinder_common::SessionId;
use serde::{Deserialize, Serialize};

use crate::geo::{BoundingBox, Coordinate};

/// Narrowing filter for forward-geocoding queries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchQueryType {
    Country,
    Region,
    Postcode,
    District,
    Place,
    Locality,
    Neighborhood,
    Street,
    Address,
    Poi,
}

impl SearchQueryType {
    /// Wire name used in telemetry attributes
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Country => "country",
            Self::Region => "region",
            Self::Postcode => "postcode",
            Self::District => "district",
            Self::Place => "place",
            Self::Locality => "locality",
            Self::Neighborhood => "neighborhood",
            Self::Street => "street",
            Self::Address => "address",
            Self::Poi => "poi",
        }
    }
}

/// Tuning knobs for a single search call
///
/// Everything is optional; the engine applies its own defaults for unset
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchOptions {
    /// ISO 3166-1 country codes to constrain results to
    pub countries: Option<Vec<String>>,
    /// Preferred response languages, best match first
    pub languages: Option<Vec<String>>,
    /// Maximum number of results to return
    pub limit: Option<usize>,
    /// Whether approximate (typo-tolerant) matching is allowed
    pub fuzzy_match: Option<bool>,
    /// Bias results towards this location
    pub proximity: Option<Coordinate>,
    /// Restrict results to this viewport
    pub bounding_box: Option<BoundingBox>,
    /// Restrict results to these entity types
    pub result_types: Option<Vec<SearchQueryType>>,
}

/// A fully-specified request as handed to the engine
///
/// Returned unchanged inside the engine response so downstream consumers
/// (telemetry in particular) can reconstruct what was asked.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestOptions {
    /// The free-form query string
    pub query: String,
    /// Category canonical names, for category search
    pub categories: Vec<String>,
    pub options: SearchOptions,
    /// Session this request belongs to, for telemetry correlation
    pub session_id: SessionId,
}

impl RequestOptions {
    pub fn new(query: impl Into<String>, options: SearchOptions) -> Self {
        Self {
            query: query.into(),
            categories: Vec::new(),
            options,
            session_id: SessionId::new(),
        }
    }
}

/// Options for a reverse-geocoding lookup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReverseGeoOptions {
    /// The point to resolve into places
    pub point: Coordinate,
    /// Maximum number of results to return
    pub limit: Option<usize>,
    /// Preferred response languages, best match first
    pub languages: Option<Vec<String>>,
}

impl ReverseGeoOptions {
    pub const fn new(point: Coordinate) -> Self {
        Self {
            point,
            limit: None,
            languages: None,
        }
    }
}
