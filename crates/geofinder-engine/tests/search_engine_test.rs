//! End-to-end tests for the search façade over a canned stub engine

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use geofinder_core::{
    Coordinate, HistoryRecord, HistoryRecorder, IndexableRecord, RecordLayer, ReverseGeoOptions,
    SearchOptions, SearchSuggestion,
};
use geofinder_engine::test_utils::{DelegateEvent, DelegateStub, assert_no_event, next_event};
use geofinder_engine::{SearchEngine, SearchError, SearchResponse};
use geofinder_native::stub::{CoreSearchEngineStub, samples};
use geofinder_native::{CoreSearchResponse, CoreSearchResult};

const ACCESS_TOKEN: &str = "test-access-token";

fn ids(results: &[CoreSearchResult]) -> Vec<String> {
    results.iter().map(|result| result.id.clone()).collect()
}

fn suggestion_ids(suggestions: &[SearchSuggestion]) -> Vec<String> {
    suggestions
        .iter()
        .map(|suggestion| suggestion.id().to_string())
        .collect()
}

/// Decode server suggestions out of a canned response, as a search would
fn suggestions_from(response: &CoreSearchResponse) -> Vec<SearchSuggestion> {
    SearchResponse::new(response.clone(), None)
        .process()
        .expect("fixture response must process")
        .suggestions
}

struct RecorderStub {
    records: Mutex<Vec<HistoryRecord>>,
}

impl RecorderStub {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            records: Mutex::new(Vec::new()),
        })
    }

    fn recorded_ids(&self) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .map(|record| record.id.clone())
            .collect()
    }
}

impl HistoryRecorder for RecorderStub {
    fn record_selection(&self, record: HistoryRecord) {
        self.records.lock().unwrap().push(record);
    }
}

struct LayerStub {
    id: String,
    records: HashMap<String, Arc<dyn IndexableRecord>>,
}

impl RecordLayer for LayerStub {
    fn layer_id(&self) -> &str {
        &self.id
    }

    fn record(&self, id: &str) -> Option<Arc<dyn IndexableRecord>> {
        self.records.get(id).cloned()
    }
}

struct StubRecord {
    id: String,
    name: String,
    coordinate: Coordinate,
}

impl IndexableRecord for StubRecord {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

#[tokio::test]
async fn test_empty_search() {
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_response(
        samples::success_response(samples::sample_request("sample-1"), Vec::new()),
    ));
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(stub, delegate);

    engine.search("sample-1");

    match next_event(&mut rx).await {
        DelegateEvent::SuggestionsUpdated(updated) => assert!(updated.is_empty()),
        other => panic!("expected suggestions update, got {other:?}"),
    }
    assert!(engine.suggestions().is_empty());
}

#[tokio::test]
async fn test_mixed_search() {
    let results = samples::make_mixed_results_set();
    let response = samples::success_response(samples::sample_request("sample-1"), results.clone());
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_response(response.clone()));
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(stub, delegate);

    engine.search("sample-1");

    match next_event(&mut rx).await {
        DelegateEvent::SuggestionsUpdated(updated) => assert_eq!(updated, ids(&results)),
        other => panic!("expected suggestions update, got {other:?}"),
    }

    // Engine state matches what processing the response directly yields
    let processed = SearchResponse::new(response, None).process().unwrap();
    assert_eq!(
        suggestion_ids(&processed.suggestions),
        suggestion_ids(&engine.suggestions())
    );
}

#[tokio::test]
async fn test_error_search() {
    let stub = Arc::new(
        CoreSearchEngineStub::new(ACCESS_TOKEN)
            .with_response(samples::failure_response(samples::sample_request("sample-1"))),
    );
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(stub, delegate.clone());

    engine.search("sample-1");

    match next_event(&mut rx).await {
        DelegateEvent::Failed(SearchError::Generic { code, domain, .. }) => {
            assert_eq!(code, 500);
            assert_eq!(domain, samples::ERROR_DOMAIN);
        }
        other => panic!("expected failure, got {other:?}"),
    }
    assert!(engine.suggestions().is_empty());
}

#[tokio::test]
async fn test_no_response_search_is_processing_failure() {
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_no_response());
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(stub, delegate);

    engine.search("sample-1");

    match next_event(&mut rx).await {
        DelegateEvent::Failed(SearchError::ResponseProcessingFailed) => {}
        other => panic!("expected processing failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_ignore_results_for_outdated_search_query() {
    let results = samples::make_mixed_results_set();
    let stub = Arc::new(
        CoreSearchEngineStub::new(ACCESS_TOKEN)
            .gated()
            .with_response(samples::success_response(
                samples::sample_request("sample-1"),
                results.clone(),
            )),
    );
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(Arc::clone(&stub) as _, delegate);

    // The second search supersedes the first before either completes
    engine.search("sample-1");
    engine.search("sample-2");
    stub.release();
    stub.release();

    // Exactly one update: the superseded response is dropped silently
    match next_event(&mut rx).await {
        DelegateEvent::SuggestionsUpdated(updated) => assert_eq!(updated, ids(&results)),
        other => panic!("expected suggestions update, got {other:?}"),
    }
    assert_no_event(&mut rx).await;
    assert_eq!(suggestion_ids(&engine.suggestions()), ids(&results));
}

#[tokio::test]
async fn test_ignore_error_for_outdated_search_query() {
    let results = samples::make_mixed_results_set();
    let stub = Arc::new(
        CoreSearchEngineStub::new(ACCESS_TOKEN)
            .gated()
            .with_response(samples::success_response(
                samples::sample_request("sample-1"),
                results.clone(),
            )),
    );
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(Arc::clone(&stub) as _, delegate);

    engine.search("sample-1");
    stub.release();
    match next_event(&mut rx).await {
        DelegateEvent::SuggestionsUpdated(updated) => assert_eq!(updated, ids(&results)),
        other => panic!("expected suggestions update, got {other:?}"),
    }

    // Two racing searches against a failing engine: only the current
    // request may surface its error
    stub.set_response(Some(samples::failure_response(samples::sample_request(
        "sample-2",
    ))));
    engine.search("sample-2");
    engine.search("sample-3");
    stub.release();
    stub.release();

    match next_event(&mut rx).await {
        DelegateEvent::Failed(SearchError::Generic { code, .. }) => assert_eq!(code, 500),
        other => panic!("expected failure, got {other:?}"),
    }
    assert_no_event(&mut rx).await;

    // The published suggestions still reflect the last successful search
    assert_eq!(suggestion_ids(&engine.suggestions()), ids(&results));
}

#[tokio::test]
async fn test_resolved_search_result() {
    let results = samples::make_mixed_results_set();
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_response(
        samples::success_response(samples::sample_request("sample-1"), results),
    ));
    let (delegate, mut rx) = DelegateStub::new();
    let recorder = RecorderStub::new();
    let engine = SearchEngine::with_providers(
        Arc::clone(&stub) as _,
        delegate.clone(),
        SearchOptions::default(),
        Vec::new(),
        Some(Arc::clone(&recorder) as _),
    );

    engine.search("sample-1");
    match next_event(&mut rx).await {
        DelegateEvent::SuggestionsUpdated(_) => {}
        other => panic!("expected suggestions update, got {other:?}"),
    }

    let selected = engine.suggestions().first().cloned().expect("suggestions");

    // Resolving delivers a fully-resolved rendition of the selected candidate
    stub.set_response(Some(samples::success_response(
        samples::sample_request("sample-1"),
        vec![samples::make_resolved_poi(selected.id())],
    )));
    engine.select(selected.clone());

    match next_event(&mut rx).await {
        DelegateEvent::ResultResolved(id) => assert_eq!(id, selected.id()),
        other => panic!("expected resolved result, got {other:?}"),
    }
    let resolved = delegate.resolved_result().expect("resolved result");
    assert_eq!(resolved.id, selected.id());

    // The engine was told about the selection and history was recorded
    assert_eq!(stub.selected_ids(), vec![selected.id().to_string()]);
    assert_eq!(recorder.recorded_ids(), vec![selected.id().to_string()]);
}

#[tokio::test]
async fn test_record_layer_suggestions_resolve_locally() {
    let layer: Arc<dyn RecordLayer> = Arc::new(LayerStub {
        id: "unit-test-layer".to_string(),
        records: HashMap::from([(
            "record-1".to_string(),
            Arc::new(StubRecord {
                id: "record-1".to_string(),
                name: "Saved Place".to_string(),
                coordinate: samples::sample_coordinate(),
            }) as Arc<dyn IndexableRecord>,
        )]),
    });

    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_response(
        samples::success_response(
            samples::sample_request("sample-1"),
            vec![samples::make_user_record("record-1", "unit-test-layer")],
        ),
    ));
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::with_providers(
        Arc::clone(&stub) as _,
        delegate.clone(),
        SearchOptions::default(),
        vec![layer],
        None,
    );

    engine.search("sample-1");
    match next_event(&mut rx).await {
        DelegateEvent::SuggestionsUpdated(updated) => {
            assert_eq!(updated, vec!["record-1".to_string()]);
        }
        other => panic!("expected suggestions update, got {other:?}"),
    }

    let calls_before_select = stub.calls();
    let selected = engine.suggestions().first().cloned().expect("suggestions");
    engine.select(selected);

    // Record suggestions resolve without another engine round trip
    match next_event(&mut rx).await {
        DelegateEvent::ResultResolved(id) => assert_eq!(id, "record-1"),
        other => panic!("expected resolved result, got {other:?}"),
    }
    assert_eq!(stub.calls(), calls_before_select);
    assert_eq!(
        delegate.resolved_result().map(|result| result.name),
        Some("Saved Place".to_string())
    );
}

#[tokio::test]
async fn test_batch_resolve() {
    let resolved = samples::make_category_results_set();
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_response(
        samples::success_response(samples::sample_request("sample-1"), resolved.clone()),
    ));
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(Arc::clone(&stub) as _, delegate.clone());

    let suggestions = suggestions_from(&samples::success_response(
        samples::sample_request("sample-1"),
        samples::make_suggestions_set(),
    ));
    engine.select_many(suggestions);

    match next_event(&mut rx).await {
        DelegateEvent::ResultsResolved(updated) => assert_eq!(updated, ids(&resolved)),
        other => panic!("expected batch results, got {other:?}"),
    }
    assert_eq!(
        delegate
            .resolved_results()
            .iter()
            .map(|result| result.id.clone())
            .collect::<Vec<_>>(),
        ids(&resolved)
    );
}

#[tokio::test]
async fn test_empty_batch_resolve() {
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_response(
        samples::success_response(
            samples::sample_request("sample-1"),
            samples::make_mixed_results_set(),
        ),
    ));
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(Arc::clone(&stub) as _, delegate.clone());

    engine.select_many(Vec::new());

    // No engine call and no delegate callback for an empty batch
    assert_no_event(&mut rx).await;
    assert_eq!(stub.calls(), 0);
    assert!(delegate.resolved_results().is_empty());
}

#[tokio::test]
async fn test_batch_resolve_failed_response() {
    let stub = Arc::new(
        CoreSearchEngineStub::new(ACCESS_TOKEN)
            .with_response(samples::failure_response(samples::sample_request("sample-1"))),
    );
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(Arc::clone(&stub) as _, delegate);

    let suggestions = suggestions_from(&samples::success_response(
        samples::sample_request("sample-1"),
        samples::make_suggestions_set(),
    ));
    engine.select_many(suggestions);

    match next_event(&mut rx).await {
        DelegateEvent::Failed(SearchError::Generic {
            code,
            domain,
            message,
        }) => {
            assert_eq!(code, 500);
            assert_eq!(domain, samples::ERROR_DOMAIN);
            assert_eq!(message, "Server Internal error");
        }
        other => panic!("expected generic failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_resolve_no_response() {
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_no_response());
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(Arc::clone(&stub) as _, delegate);

    let suggestions = suggestions_from(&samples::success_response(
        samples::sample_request("sample-1"),
        samples::make_suggestions_set(),
    ));
    engine.select_many(suggestions);

    match next_event(&mut rx).await {
        DelegateEvent::Failed(SearchError::ResponseProcessingFailed) => {}
        other => panic!("expected processing failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_suggestion_type_query_triggers_new_search() {
    let expected = samples::make_mixed_results_set();
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_response(
        samples::success_response(samples::sample_request("sample one"), expected.clone()),
    ));
    let (delegate, mut rx) = DelegateStub::new();
    let engine = SearchEngine::new(Arc::clone(&stub) as _, delegate);

    let suggestions = suggestions_from(&samples::success_response(
        samples::sample_request("sample-1"),
        vec![samples::make_query_suggestion("query-1", "sample one")],
    ));
    engine.set_query("sample-1");
    engine.select(suggestions.first().cloned().expect("query suggestion"));

    match next_event(&mut rx).await {
        DelegateEvent::SuggestionsUpdated(updated) => assert_eq!(updated, ids(&expected)),
        other => panic!("expected suggestions update, got {other:?}"),
    }
    // Selecting a refinement rewrites the current query
    assert_eq!(engine.query(), "sample one");
}

#[tokio::test]
async fn test_reverse_geocoding() {
    let resolved = samples::make_category_results_set();
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_response(
        samples::success_response(samples::sample_request(""), resolved.clone()),
    ));
    let (delegate, _rx) = DelegateStub::new();
    let engine = SearchEngine::new(stub, delegate);

    let options = ReverseGeoOptions::new(Coordinate::new(12.0, 12.0));
    let results = engine.reverse_geocoding(&options).await.expect("results");

    assert_eq!(
        results.iter().map(|result| result.id.clone()).collect::<Vec<_>>(),
        ids(&resolved)
    );
}

#[tokio::test]
async fn test_reverse_geocoding_failed_response() {
    let stub = Arc::new(
        CoreSearchEngineStub::new(ACCESS_TOKEN)
            .with_response(samples::failure_response(samples::sample_request(""))),
    );
    let (delegate, _rx) = DelegateStub::new();
    let engine = SearchEngine::new(stub, delegate);

    let options = ReverseGeoOptions::new(Coordinate::new(12.0, 12.0));
    match engine.reverse_geocoding(&options).await {
        Err(SearchError::ReverseGeocodingFailed {
            reason,
            options: failed_options,
        }) => {
            assert_eq!(
                *reason,
                SearchError::Generic {
                    code: 500,
                    domain: samples::ERROR_DOMAIN.to_string(),
                    message: "Server Internal error".to_string(),
                }
            );
            assert_eq!(failed_options.point, Coordinate::new(12.0, 12.0));
        }
        other => panic!("expected reverse geocoding failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reverse_geocoding_no_response() {
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN).with_no_response());
    let (delegate, _rx) = DelegateStub::new();
    let engine = SearchEngine::new(stub, delegate);

    let options = ReverseGeoOptions::new(Coordinate::new(12.0, 12.0));
    match engine.reverse_geocoding(&options).await {
        Err(SearchError::ResponseProcessingFailed) => {}
        other => panic!("expected processing failure, got {other:?}"),
    }
}

#[tokio::test]
async fn test_query_getter_setter() {
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN));
    let (delegate, _rx) = DelegateStub::new();
    let engine = SearchEngine::new(stub, delegate);

    assert_eq!(engine.query(), "");

    engine.set_query("random-query");
    assert_eq!(engine.query(), "random-query");
}

#[tokio::test]
async fn test_access_token_update() {
    let stub = Arc::new(CoreSearchEngineStub::new(ACCESS_TOKEN));
    let (delegate, _rx) = DelegateStub::new();
    let engine = SearchEngine::new(Arc::clone(&stub) as _, delegate);

    assert_eq!(stub.access_token(), ACCESS_TOKEN);

    engine.set_access_token("updated-token");
    assert_eq!(stub.access_token(), "updated-token");
}
