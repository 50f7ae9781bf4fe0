//! User records: favorites, history, and the indexable-record capability

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::address::Address;
use crate::geo::Coordinate;
use crate::result::{RoutablePoint, SearchResult, SearchResultMetadata, SearchResultType};

/// A user-owned record the engine can index and surface as a suggestion
///
/// Implemented by the built-in history and favorite records; SDK consumers
/// can implement it for their own record types and expose them through a
/// [`crate::provider::RecordLayer`].
pub trait IndexableRecord: Send + Sync {
    fn id(&self) -> &str;
    fn name(&self) -> &str;
    fn coordinate(&self) -> Coordinate;
    fn address(&self) -> Option<&Address> {
        None
    }
    fn categories(&self) -> Option<&[String]> {
        None
    }
    fn icon_name(&self) -> Option<&str> {
        None
    }
    fn metadata(&self) -> Option<&SearchResultMetadata> {
        None
    }
    /// Additional tokens the engine should match this record under
    fn indexable_tokens(&self) -> Vec<String> {
        Vec::new()
    }
}

/// What kind of interaction produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryType {
    /// A resolved result the user selected
    Result,
    /// A raw query the user submitted
    Query,
    /// A category the user browsed
    Category,
}

/// One entry of the local search history
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub id: String,
    pub name: String,
    pub matching_name: Option<String>,
    pub coordinate: Coordinate,
    pub timestamp: DateTime<Utc>,
    pub history_type: HistoryType,
    pub record_type: SearchResultType,
    pub address: Option<Address>,
    pub metadata: Option<SearchResultMetadata>,
    pub routable_points: Option<Vec<RoutablePoint>>,
}

impl HistoryRecord {
    /// Snapshot a selected result into a history entry
    pub fn from_search_result(result: &SearchResult, timestamp: DateTime<Utc>) -> Self {
        Self {
            id: result.id.clone(),
            name: result.name.clone(),
            matching_name: result.matching_name.clone(),
            coordinate: result.coordinate,
            timestamp,
            history_type: HistoryType::Result,
            record_type: result.result_type.clone(),
            address: result.address.clone(),
            metadata: result.metadata.clone(),
            routable_points: result.routable_points.clone(),
        }
    }

    /// One-line display description, derived from the address when present
    pub fn description_text(&self) -> Option<String> {
        self.address
            .as_ref()
            .and_then(|address| address.formatted_address(crate::address::AddressFormatStyle::Medium))
    }
}

impl IndexableRecord for HistoryRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    fn metadata(&self) -> Option<&SearchResultMetadata> {
        self.metadata.as_ref()
    }
}

/// A place the user saved under a name of their choosing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FavoriteRecord {
    pub id: String,
    /// User-chosen display name ("Home", "Work", …)
    pub name: String,
    pub coordinate: Coordinate,
    pub address: Option<Address>,
    pub icon_name: Option<String>,
    pub categories: Vec<String>,
    pub result_type: SearchResultType,
    pub metadata: Option<SearchResultMetadata>,
}

impl FavoriteRecord {
    /// Save a resolved result as a favorite under `name`
    pub fn new(name: impl Into<String>, result: &SearchResult) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            coordinate: result.coordinate,
            address: result.address.clone(),
            icon_name: result.icon_name.clone(),
            categories: result.categories.clone().unwrap_or_default(),
            result_type: result.result_type.clone(),
            metadata: result.metadata.clone(),
        }
    }
}

impl IndexableRecord for FavoriteRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }

    fn address(&self) -> Option<&Address> {
        self.address.as_ref()
    }

    fn categories(&self) -> Option<&[String]> {
        Some(&self.categories)
    }

    fn icon_name(&self) -> Option<&str> {
        self.icon_name.as_deref()
    }

    fn metadata(&self) -> Option<&SearchResultMetadata> {
        self.metadata.as_ref()
    }

    fn indexable_tokens(&self) -> Vec<String> {
        // Favorites should also match under their address line
        self.address
            .as_ref()
            .and_then(|address| {
                address.formatted_address(crate::address::AddressFormatStyle::Medium)
            })
            .into_iter()
            .collect()
    }
}
