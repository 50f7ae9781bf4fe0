//! Search suggestions: unresolved or lightly-resolved candidates

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::geo::Coordinate;
use crate::record::IndexableRecord;
use crate::result::{ResponseContext, SearchResultMetadata, SearchResultType};

/// A server-produced candidate, resolved when it already carries a center
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSuggestion {
    pub id: String,
    pub name: String,
    pub matching_name: Option<String>,
    pub result_type: SearchResultType,
    /// Present iff the server already resolved the candidate
    pub coordinate: Option<Coordinate>,
    pub address: Option<Address>,
    pub categories: Option<Vec<String>>,
    pub icon_name: Option<String>,
    pub metadata: Option<SearchResultMetadata>,
    pub server_index: Option<i64>,
    pub languages: Option<Vec<String>>,
    pub context: ResponseContext,
}

/// A canonical category the user can drill into ("coffee", "fuel", …)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySuggestion {
    pub id: String,
    pub name: String,
    /// Canonical category identifier understood by the engine
    pub canonical_id: String,
    pub icon_name: Option<String>,
    pub context: ResponseContext,
}

/// A refined query string to search for instead of resolving a place
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuerySuggestion {
    pub id: String,
    /// The refined query to re-run
    pub query: String,
    pub context: ResponseContext,
}

/// A match against a user record exposed through a record layer
#[derive(Clone)]
pub struct RecordSuggestion {
    pub id: String,
    /// Identifier of the layer the record came from
    pub layer_id: String,
    pub record: Arc<dyn IndexableRecord>,
    pub context: ResponseContext,
}

impl std::fmt::Debug for RecordSuggestion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordSuggestion")
            .field("id", &self.id)
            .field("layer_id", &self.layer_id)
            .field("record", &self.record.id())
            .finish_non_exhaustive()
    }
}

/// An unresolved or lightly-resolved search candidate
///
/// Variants mirror what the engine can return: server candidates, category
/// drill-downs, query refinements, and matches against user records.
#[derive(Debug, Clone)]
pub enum SearchSuggestion {
    Server(ServerSuggestion),
    Category(CategorySuggestion),
    Query(QuerySuggestion),
    Record(RecordSuggestion),
}

impl SearchSuggestion {
    pub fn id(&self) -> &str {
        match self {
            Self::Server(suggestion) => &suggestion.id,
            Self::Category(suggestion) => &suggestion.id,
            Self::Query(suggestion) => &suggestion.id,
            Self::Record(suggestion) => &suggestion.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Server(suggestion) => &suggestion.name,
            Self::Category(suggestion) => &suggestion.name,
            Self::Query(suggestion) => &suggestion.query,
            Self::Record(suggestion) => suggestion.record.name(),
        }
    }

    /// The concrete location, for suggestions that already carry one
    pub fn coordinate(&self) -> Option<Coordinate> {
        match self {
            Self::Server(suggestion) => suggestion.coordinate,
            Self::Record(suggestion) => Some(suggestion.record.coordinate()),
            Self::Category(_) | Self::Query(_) => None,
        }
    }

    pub fn address(&self) -> Option<&Address> {
        match self {
            Self::Server(suggestion) => suggestion.address.as_ref(),
            Self::Record(suggestion) => suggestion.record.address(),
            Self::Category(_) | Self::Query(_) => None,
        }
    }

    /// Server ranking of the suggestion, when known
    pub fn server_index(&self) -> Option<i64> {
        match self {
            Self::Server(suggestion) => suggestion.server_index,
            _ => None,
        }
    }

    pub fn context(&self) -> &ResponseContext {
        match self {
            Self::Server(suggestion) => &suggestion.context,
            Self::Category(suggestion) => &suggestion.context,
            Self::Query(suggestion) => &suggestion.context,
            Self::Record(suggestion) => &suggestion.context,
        }
    }
}
