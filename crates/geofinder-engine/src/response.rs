//! Transformation of raw engine responses into typed outcomes

use std::sync::Arc;

use geofinder_core::{
    AddressKind, CategorySuggestion, IndexableRecord, QuerySuggestion, RecordLayer,
    RecordSuggestion, ResponseContext, SearchResult, SearchResultType, SearchSuggestion,
    ServerSuggestion,
};
use geofinder_native::{CoreError, CoreResultType, CoreSearchResponse, CoreSearchResult};

use crate::error::SearchError;

/// Typed outcome of a successful engine response
///
/// `results` is always a subset of `suggestions`: a result is a suggestion
/// the engine already resolved to a concrete coordinate.
#[derive(Debug, Clone, Default)]
pub struct ProcessedResponse {
    pub suggestions: Vec<SearchSuggestion>,
    pub results: Vec<SearchResult>,
}

/// A raw engine response paired with any transport-level error observed
/// alongside it
#[derive(Debug, Clone)]
pub struct SearchResponse {
    core: CoreSearchResponse,
    associated_error: Option<CoreError>,
}

impl SearchResponse {
    pub const fn new(core: CoreSearchResponse, associated_error: Option<CoreError>) -> Self {
        Self {
            core,
            associated_error,
        }
    }

    /// The request/response pair candidates of this response belong to
    fn context(&self) -> ResponseContext {
        ResponseContext {
            request: self.core.request.clone(),
            response_uuid: self.core.response_uuid.clone(),
        }
    }

    /// Transform the raw result list into suggestions and resolved results
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::Generic`] for transport or engine failures and
    /// [`SearchError::ResponseProcessingFailed`] when the payload contains a
    /// candidate that cannot be decoded.
    pub fn process(&self) -> Result<ProcessedResponse, SearchError> {
        self.process_with_layers(&[])
    }

    /// Like [`Self::process`], resolving user-record candidates against the
    /// given record layers
    ///
    /// # Errors
    ///
    /// See [`Self::process`]; additionally fails when a user-record
    /// candidate references a layer that is not registered.
    pub fn process_with_layers(
        &self,
        layers: &[Arc<dyn RecordLayer>],
    ) -> Result<ProcessedResponse, SearchError> {
        // A transport error observed alongside the response wins over
        // whatever the engine managed to report.
        if let Some(error) = &self.associated_error {
            return Err(SearchError::from(error.clone()));
        }

        let candidates = match &self.core.result {
            Ok(candidates) => candidates,
            Err(error) => return Err(SearchError::from(error.clone())),
        };

        let context = self.context();
        let mut processed = ProcessedResponse::default();

        for candidate in candidates {
            let suggestion = to_suggestion(candidate, &context, layers)?;
            if let Some(result) = to_search_result(&suggestion, candidate) {
                processed.results.push(result);
            }
            processed.suggestions.push(suggestion);
        }

        Ok(processed)
    }
}

/// Map the engine's type tags onto a result classification
///
/// `None` for tags that never classify a resolved result (query, category,
/// user record, unknown).
fn to_result_type(result_types: &[CoreResultType]) -> Option<SearchResultType> {
    if result_types.contains(&CoreResultType::Poi) {
        return Some(SearchResultType::Poi);
    }

    let subtypes: Option<Vec<AddressKind>> = result_types
        .iter()
        .map(|result_type| match result_type {
            CoreResultType::Country => Some(AddressKind::Country),
            CoreResultType::Region => Some(AddressKind::Region),
            CoreResultType::Postcode => Some(AddressKind::Postcode),
            CoreResultType::District => Some(AddressKind::District),
            CoreResultType::Place => Some(AddressKind::Place),
            CoreResultType::Locality => Some(AddressKind::Locality),
            CoreResultType::Neighborhood => Some(AddressKind::Neighborhood),
            CoreResultType::Street => Some(AddressKind::Street),
            CoreResultType::Address => Some(AddressKind::Address),
            _ => None,
        })
        .collect();

    match subtypes {
        Some(subtypes) if !subtypes.is_empty() => Some(SearchResultType::Address { subtypes }),
        _ => None,
    }
}

fn to_suggestion(
    candidate: &CoreSearchResult,
    context: &ResponseContext,
    layers: &[Arc<dyn RecordLayer>],
) -> Result<SearchSuggestion, SearchError> {
    match candidate.result_type() {
        CoreResultType::Query => Ok(SearchSuggestion::Query(QuerySuggestion {
            id: candidate.id.clone(),
            query: candidate.name().to_string(),
            context: context.clone(),
        })),
        CoreResultType::Category => Ok(SearchSuggestion::Category(CategorySuggestion {
            id: candidate.id.clone(),
            name: candidate.name().to_string(),
            canonical_id: candidate
                .categories
                .as_ref()
                .and_then(|categories| categories.first().cloned())
                .unwrap_or_else(|| candidate.id.clone()),
            icon_name: candidate.icon_name.clone(),
            context: context.clone(),
        })),
        CoreResultType::UserRecord => {
            let layer_id = candidate.layer_id.as_deref();
            let record = layer_id.and_then(|layer_id| {
                layers
                    .iter()
                    .find(|layer| layer.layer_id() == layer_id)
                    .and_then(|layer| layer.record(&candidate.id))
            });
            match (layer_id, record) {
                (Some(layer_id), Some(record)) => {
                    Ok(SearchSuggestion::Record(RecordSuggestion {
                        id: candidate.id.clone(),
                        layer_id: layer_id.to_string(),
                        record,
                        context: context.clone(),
                    }))
                }
                _ => {
                    tracing::warn!(
                        id = %candidate.id,
                        layer = ?candidate.layer_id,
                        "user-record candidate references an unregistered layer"
                    );
                    Err(SearchError::ResponseProcessingFailed)
                }
            }
        }
        CoreResultType::Unknown => {
            tracing::warn!(id = %candidate.id, "candidate with unknown result type");
            Err(SearchError::ResponseProcessingFailed)
        }
        _ => {
            let result_type =
                to_result_type(&candidate.result_types).ok_or(SearchError::ResponseProcessingFailed)?;
            Ok(SearchSuggestion::Server(ServerSuggestion {
                id: candidate.id.clone(),
                name: candidate.name().to_string(),
                matching_name: None,
                result_type,
                coordinate: candidate.center,
                address: candidate.address.clone(),
                categories: candidate.categories.clone(),
                icon_name: candidate.icon_name.clone(),
                metadata: candidate.metadata.clone(),
                server_index: candidate.server_index,
                languages: Some(candidate.languages.clone()),
                context: context.clone(),
            }))
        }
    }
}

/// Resolved rendition of a suggestion, when it already carries a coordinate
fn to_search_result(
    suggestion: &SearchSuggestion,
    candidate: &CoreSearchResult,
) -> Option<SearchResult> {
    let coordinate = suggestion.coordinate()?;
    match suggestion {
        SearchSuggestion::Server(server) => Some(SearchResult {
            id: server.id.clone(),
            name: server.name.clone(),
            matching_name: server.matching_name.clone(),
            result_type: server.result_type.clone(),
            coordinate,
            address: server.address.clone(),
            categories: server.categories.clone(),
            icon_name: server.icon_name.clone(),
            routable_points: None,
            metadata: server.metadata.clone(),
            server_index: server.server_index,
            languages: server.languages.clone(),
            context: Some(server.context.clone()),
        }),
        SearchSuggestion::Category(category) => Some(SearchResult {
            id: category.id.clone(),
            name: category.name.clone(),
            matching_name: None,
            result_type: SearchResultType::Poi,
            coordinate,
            address: candidate.address.clone(),
            categories: candidate.categories.clone(),
            icon_name: category.icon_name.clone(),
            routable_points: None,
            metadata: candidate.metadata.clone(),
            server_index: candidate.server_index,
            languages: Some(candidate.languages.clone()),
            context: Some(category.context.clone()),
        }),
        SearchSuggestion::Record(record) => Some(search_result_from_record(
            record.record.as_ref(),
            &record.context,
        )),
        SearchSuggestion::Query(_) => None,
    }
}

/// Materialize a user record as a resolved result
pub(crate) fn search_result_from_record(
    record: &dyn IndexableRecord,
    context: &ResponseContext,
) -> SearchResult {
    SearchResult {
        id: record.id().to_string(),
        name: record.name().to_string(),
        matching_name: None,
        result_type: SearchResultType::Poi,
        coordinate: record.coordinate(),
        address: record.address().cloned(),
        categories: record.categories().map(<[String]>::to_vec),
        icon_name: record.icon_name().map(str::to_string),
        routable_points: None,
        metadata: record.metadata().cloned(),
        server_index: None,
        languages: None,
        context: Some(context.clone()),
    }
}
