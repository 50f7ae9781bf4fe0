//! The user-facing search façade

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use chrono::Utc;

use geofinder_core::{
    AddressKind, HistoryRecord, HistoryRecorder, RecordLayer, RequestOptions, ReverseGeoOptions,
    SearchOptions, SearchResult, SearchResultType, SearchSuggestion, ServerSuggestion,
};
use geofinder_native::{CoreResultType, CoreSearchEngine, CoreSearchResponse, CoreSearchResult};

use crate::delegate::SearchEngineDelegate;
use crate::error::SearchError;
use crate::response::{SearchResponse, search_result_from_record};

// Type aliases to simplify complex types
type SharedEngine = Arc<dyn CoreSearchEngine>;
type SharedDelegate = Arc<dyn SearchEngineDelegate>;

/// Search façade forwarding queries to the underlying engine
///
/// Holds the current query, the published suggestion list, and a request
/// sequence used to discard responses to superseded requests. All state
/// changes are reported through the delegate; `search` and `select` carry
/// no return value.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct SearchEngine {
    inner: Arc<Inner>,
}

struct Inner {
    core: SharedEngine,
    delegate: SharedDelegate,
    query: Mutex<String>,
    suggestions: Mutex<Vec<SearchSuggestion>>,
    /// Sequence number of the most recently issued request; responses
    /// carrying an older token are dropped without delegate callbacks
    request_seq: AtomicU64,
    default_options: SearchOptions,
    record_layers: Vec<Arc<dyn RecordLayer>>,
    history: Option<Arc<dyn HistoryRecorder>>,
}

impl SearchEngine {
    /// Create a façade over `core` reporting to `delegate`
    pub fn new(core: SharedEngine, delegate: SharedDelegate) -> Self {
        Self::with_providers(core, delegate, SearchOptions::default(), Vec::new(), None)
    }

    /// Create a fully-wired façade with record layers and history recording
    pub fn with_providers(
        core: SharedEngine,
        delegate: SharedDelegate,
        default_options: SearchOptions,
        record_layers: Vec<Arc<dyn RecordLayer>>,
        history: Option<Arc<dyn HistoryRecorder>>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                core,
                delegate,
                query: Mutex::new(String::new()),
                suggestions: Mutex::new(Vec::new()),
                request_seq: AtomicU64::new(0),
                default_options,
                record_layers,
                history,
            }),
        }
    }

    /// The most recently searched query string
    pub fn query(&self) -> String {
        self.inner
            .query
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    pub fn set_query(&self, query: &str) {
        if let Ok(mut guard) = self.inner.query.lock() {
            *guard = query.to_string();
        }
    }

    /// Suggestions published by the latest successful search
    pub fn suggestions(&self) -> Vec<SearchSuggestion> {
        self.inner
            .suggestions
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Rotate the access token used by the underlying engine
    pub fn set_access_token(&self, token: &str) {
        self.inner.core.set_access_token(token);
    }

    /// Run a search with the engine-wide default options
    ///
    /// Completion is reported through the delegate; if another search is
    /// issued before this one completes, its response is dropped silently.
    pub fn search(&self, query: &str) {
        self.search_with_options(query, self.inner.default_options.clone());
    }

    /// Run a search with per-call options
    #[tracing::instrument(skip(self, options))]
    pub fn search_with_options(&self, query: &str, options: SearchOptions) {
        self.set_query(query);
        let token = self.inner.next_token();
        let inner = Arc::clone(&self.inner);
        let query = query.to_string();
        tokio::spawn(async move {
            inner.run_search(token, query, Vec::new(), options).await;
        });
    }

    /// Resolve a single suggestion
    ///
    /// Query-refinement suggestions re-run the search with the refined
    /// query; category suggestions re-run the search within the category;
    /// server and user-record suggestions resolve to exactly one result
    /// surfaced via `result_resolved`.
    #[tracing::instrument(skip(self, suggestion), fields(id = suggestion.id()))]
    pub fn select(&self, suggestion: SearchSuggestion) {
        match suggestion {
            SearchSuggestion::Query(query_suggestion) => {
                self.search(&query_suggestion.query);
            }
            SearchSuggestion::Category(category) => {
                self.set_query("");
                let token = self.inner.next_token();
                let inner = Arc::clone(&self.inner);
                let options = self.inner.default_options.clone();
                tokio::spawn(async move {
                    inner
                        .run_search(token, String::new(), vec![category.canonical_id], options)
                        .await;
                });
            }
            SearchSuggestion::Record(record) => {
                // Record layers hold resolved places; no engine round trip
                let result = search_result_from_record(record.record.as_ref(), &record.context);
                self.inner.record_selection(&result);
                self.inner.delegate.result_resolved(&result);
            }
            SearchSuggestion::Server(server) => {
                let inner = Arc::clone(&self.inner);
                tokio::spawn(async move {
                    inner.run_resolve(server).await;
                });
            }
        }
    }

    /// Batch-resolve server suggestions and surface the full result list
    ///
    /// An empty batch is a no-op: no engine call, no delegate callback.
    #[tracing::instrument(skip(self, suggestions), fields(count = suggestions.len()))]
    pub fn select_many(&self, suggestions: Vec<SearchSuggestion>) {
        let candidates: Vec<CoreSearchResult> = suggestions
            .iter()
            .filter_map(|suggestion| match suggestion {
                SearchSuggestion::Server(server) => Some(core_candidate_from(server)),
                _ => None,
            })
            .collect();

        let request = suggestions.iter().find_map(|suggestion| match suggestion {
            SearchSuggestion::Server(server) => Some(server.context.request.clone()),
            _ => None,
        });

        if candidates.is_empty() {
            return;
        }
        let Some(request) = request else { return };

        let inner = Arc::clone(&self.inner);
        tokio::spawn(async move {
            inner.run_batch_resolve(candidates, request).await;
        });
    }

    /// Resolve a coordinate into the places containing it
    ///
    /// # Errors
    ///
    /// [`SearchError::ResponseProcessingFailed`] when the engine delivers no
    /// usable payload; [`SearchError::ReverseGeocodingFailed`] wrapping the
    /// engine's error together with the originating options otherwise.
    #[tracing::instrument(skip(self, options))]
    pub async fn reverse_geocoding(
        &self,
        options: &ReverseGeoOptions,
    ) -> Result<Vec<SearchResult>, SearchError> {
        match self.inner.core.reverse_geocoding(options).await {
            None => Err(SearchError::ResponseProcessingFailed),
            Some(response) => SearchResponse::new(response, None)
                .process()
                .map(|processed| processed.results)
                .map_err(|reason| match reason {
                    SearchError::ResponseProcessingFailed => SearchError::ResponseProcessingFailed,
                    reason => SearchError::ReverseGeocodingFailed {
                        reason: Box::new(reason),
                        options: options.clone(),
                    },
                }),
        }
    }
}

impl Inner {
    fn next_token(&self) -> u64 {
        self.request_seq
            .fetch_add(1, Ordering::SeqCst)
            .wrapping_add(1)
    }

    fn is_current(&self, token: u64) -> bool {
        token == self.request_seq.load(Ordering::SeqCst)
    }

    async fn run_search(
        &self,
        token: u64,
        query: String,
        categories: Vec<String>,
        options: SearchOptions,
    ) {
        let response = self.core.search(&query, &categories, &options).await;
        self.complete_search(token, response);
    }

    /// Apply a completed search response unless it was superseded
    fn complete_search(&self, token: u64, response: Option<CoreSearchResponse>) {
        if !self.is_current(token) {
            tracing::debug!(token, "discarding response for superseded request");
            return;
        }

        let Some(response) = response else {
            self.delegate
                .search_failed(&SearchError::ResponseProcessingFailed);
            return;
        };

        match SearchResponse::new(response, None).process_with_layers(&self.record_layers) {
            Ok(processed) => {
                if let Ok(mut guard) = self.suggestions.lock() {
                    *guard = processed.suggestions.clone();
                }
                self.delegate.suggestions_updated(&processed.suggestions);
            }
            Err(error) => self.delegate.search_failed(&error),
        }
    }

    async fn run_resolve(&self, server: ServerSuggestion) {
        let candidate = core_candidate_from(&server);
        let request = server.context.request.clone();

        let Some(response) = self.core.resolve(&candidate, &request).await else {
            self.delegate
                .search_failed(&SearchError::ResponseProcessingFailed);
            return;
        };

        match SearchResponse::new(response, None).process_with_layers(&self.record_layers) {
            Ok(processed) => {
                // Prefer the resolved rendition of the selected candidate;
                // fall back to whatever the engine put first.
                let resolved = processed
                    .results
                    .iter()
                    .find(|result| result.id == server.id)
                    .or_else(|| processed.results.first())
                    .cloned();
                match resolved {
                    Some(result) => {
                        self.core.on_selected(&request, &candidate);
                        self.record_selection(&result);
                        self.delegate.result_resolved(&result);
                    }
                    None => self
                        .delegate
                        .search_failed(&SearchError::ResponseProcessingFailed),
                }
            }
            Err(error) => self.delegate.search_failed(&error),
        }
    }

    async fn run_batch_resolve(&self, candidates: Vec<CoreSearchResult>, request: RequestOptions) {
        let Some(response) = self.core.batch_resolve(&candidates, &request).await else {
            self.delegate
                .search_failed(&SearchError::ResponseProcessingFailed);
            return;
        };

        match SearchResponse::new(response, None).process_with_layers(&self.record_layers) {
            Ok(processed) => self.delegate.results_resolved(&processed.results),
            Err(error) => self.delegate.search_failed(&error),
        }
    }

    fn record_selection(&self, result: &SearchResult) {
        if let Some(history) = &self.history {
            history.record_selection(HistoryRecord::from_search_result(result, Utc::now()));
        }
    }
}

/// Rebuild the raw candidate a server suggestion was decoded from
fn core_candidate_from(server: &ServerSuggestion) -> CoreSearchResult {
    let result_types = match &server.result_type {
        SearchResultType::Poi => vec![CoreResultType::Poi],
        SearchResultType::Address { subtypes } => subtypes
            .iter()
            .map(|kind| match kind {
                AddressKind::Country => CoreResultType::Country,
                AddressKind::Region => CoreResultType::Region,
                AddressKind::Postcode => CoreResultType::Postcode,
                AddressKind::District => CoreResultType::District,
                AddressKind::Place => CoreResultType::Place,
                AddressKind::Locality => CoreResultType::Locality,
                AddressKind::Neighborhood => CoreResultType::Neighborhood,
                AddressKind::Street => CoreResultType::Street,
                AddressKind::Address => CoreResultType::Address,
            })
            .collect(),
    };

    CoreSearchResult {
        id: server.id.clone(),
        result_types,
        names: vec![server.name.clone()],
        languages: server.languages.clone().unwrap_or_default(),
        center: server.coordinate,
        address: server.address.clone(),
        categories: server.categories.clone(),
        icon_name: server.icon_name.clone(),
        server_index: server.server_index,
        metadata: server.metadata.clone(),
        layer_id: None,
    }
}
