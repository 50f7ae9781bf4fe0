//! Resolved search results and their metadata

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::address::{Address, AddressFormatStyle};
use crate::geo::Coordinate;
use crate::options::RequestOptions;

/// Address entity kinds a result can represent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressKind {
    Country,
    Region,
    Postcode,
    District,
    Place,
    Locality,
    Neighborhood,
    Street,
    Address,
}

/// Broad classification of a resolved result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SearchResultType {
    /// A point of interest (shop, venue, landmark)
    Poi,
    /// An address-like entity, most specific subtype last
    Address { subtypes: Vec<AddressKind> },
}

/// A named point suitable for routing to (entrance, parking, …)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutablePoint {
    pub name: String,
    pub point: Coordinate,
}

/// Extra attributes a data source may attach to a result
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchResultMetadata {
    pub phone: Option<String>,
    pub website: Option<String>,
    pub rating: Option<f64>,
    pub description: Option<String>,
    /// Source-specific attributes with no dedicated field
    pub data: HashMap<String, String>,
}

/// The request/response pair a result originated from
///
/// Carried on results and suggestions so feedback telemetry can
/// reconstruct the originating query without reaching back into the
/// engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseContext {
    pub request: RequestOptions,
    /// Engine-assigned identifier of the response
    pub response_uuid: String,
}

/// A search item resolved to a concrete location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    pub name: String,
    /// Name variant that matched the query, when it differs from `name`
    pub matching_name: Option<String>,
    pub result_type: SearchResultType,
    pub coordinate: Coordinate,
    pub address: Option<Address>,
    pub categories: Option<Vec<String>>,
    pub icon_name: Option<String>,
    pub routable_points: Option<Vec<RoutablePoint>>,
    pub metadata: Option<SearchResultMetadata>,
    /// Position the server ranked this result at, when known
    pub server_index: Option<i64>,
    /// Response languages, best match first
    pub languages: Option<Vec<String>>,
    /// Where this result came from; absent for locally-built results
    pub context: Option<ResponseContext>,
}

impl SearchResult {
    /// One-line display description, derived from the address when present
    pub fn description_text(&self) -> Option<String> {
        self.address
            .as_ref()
            .and_then(|address| address.formatted_address(AddressFormatStyle::Medium))
    }
}
