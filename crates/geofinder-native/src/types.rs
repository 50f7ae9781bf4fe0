//! Raw types spoken by the underlying engine

use serde::{Deserialize, Serialize};

use geofinder_core::{
    Address, Coordinate, RequestOptions, SearchQueryType, SearchResultMetadata,
};

/// Result type tags as reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoreResultType {
    Unknown,
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
    Category,
    Query,
    UserRecord,
}

impl CoreResultType {
    /// Wire name used in telemetry attributes
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => "unknown",
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
            Self::Category => "category",
            Self::Query => "query",
            Self::UserRecord => "user_record",
        }
    }
}

impl From<SearchQueryType> for CoreResultType {
    fn from(query_type: SearchQueryType) -> Self {
        match query_type {
            SearchQueryType::Country => Self::Country,
            SearchQueryType::Region => Self::Region,
            SearchQueryType::Postcode => Self::Postcode,
            SearchQueryType::District => Self::District,
            SearchQueryType::Place => Self::Place,
            SearchQueryType::Locality => Self::Locality,
            SearchQueryType::Neighborhood => Self::Neighborhood,
            SearchQueryType::Street => Self::Street,
            SearchQueryType::Address => Self::Address,
            SearchQueryType::Poi => Self::Poi,
        }
    }
}

/// One raw candidate as delivered by the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreSearchResult {
    pub id: String,
    /// Type tags, most specific first; never empty
    pub result_types: Vec<CoreResultType>,
    /// Display names, preferred language first; never empty
    pub names: Vec<String>,
    pub languages: Vec<String>,
    /// Present iff the engine already resolved the candidate
    pub center: Option<Coordinate>,
    pub address: Option<Address>,
    pub categories: Option<Vec<String>>,
    pub icon_name: Option<String>,
    /// Position the server ranked this candidate at
    pub server_index: Option<i64>,
    pub metadata: Option<SearchResultMetadata>,
    /// Layer identifier for user-record candidates
    pub layer_id: Option<String>,
}

impl CoreSearchResult {
    /// Primary type tag of the candidate
    pub fn result_type(&self) -> CoreResultType {
        self.result_types
            .first()
            .copied()
            .unwrap_or(CoreResultType::Unknown)
    }

    /// Primary display name of the candidate
    pub fn name(&self) -> &str {
        self.names.first().map_or("", String::as_str)
    }
}

/// Error triple reported by the engine for failed requests
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreError {
    pub code: i32,
    pub domain: String,
    pub message: String,
}

/// A complete engine response, echoing the originating request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoreSearchResponse {
    pub request: RequestOptions,
    /// Engine-assigned identifier of this response
    pub response_uuid: String,
    pub result: Result<Vec<CoreSearchResult>, CoreError>,
}

#[cfg(test)]
mod tests {
    use super::{CoreResultType, CoreSearchResult};
    use geofinder_core::SearchQueryType;

    #[test]
    fn test_query_type_conversions() {
        assert_eq!(
            CoreResultType::from(SearchQueryType::Country),
            CoreResultType::Country
        );
        assert_eq!(
            CoreResultType::from(SearchQueryType::Region),
            CoreResultType::Region
        );
        assert_eq!(
            CoreResultType::from(SearchQueryType::Postcode),
            CoreResultType::Postcode
        );
        assert_eq!(
            CoreResultType::from(SearchQueryType::District),
            CoreResultType::District
        );
        assert_eq!(
            CoreResultType::from(SearchQueryType::Place),
            CoreResultType::Place
        );
        assert_eq!(
            CoreResultType::from(SearchQueryType::Locality),
            CoreResultType::Locality
        );
        assert_eq!(
            CoreResultType::from(SearchQueryType::Neighborhood),
            CoreResultType::Neighborhood
        );
        assert_eq!(
            CoreResultType::from(SearchQueryType::Address),
            CoreResultType::Address
        );
        assert_eq!(
            CoreResultType::from(SearchQueryType::Poi),
            CoreResultType::Poi
        );
    }

    #[test]
    fn test_result_type_falls_back_to_unknown() {
        let result = CoreSearchResult {
            id: "x".to_string(),
            result_types: Vec::new(),
            names: Vec::new(),
            languages: Vec::new(),
            center: None,
            address: None,
            categories: None,
            icon_name: None,
            server_index: None,
            metadata: None,
            layer_id: None,
        };
        assert_eq!(result.result_type(), CoreResultType::Unknown);
        assert_eq!(result.name(), "");
    }
}
