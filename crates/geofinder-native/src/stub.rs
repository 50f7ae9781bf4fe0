//! Canned stub engine for testing
//!
//! The stub returns a single configured response for every operation,
//! mirroring how the real engine delivers one callback per request. Calls
//! can optionally be held behind a gate so tests can interleave requests
//! deterministically.

// Allow test-specific patterns in stub implementation
#![allow(clippy::unwrap_used)] // Stubs can panic on lock poisoning
#![allow(clippy::missing_panics_doc)] // Test code panics intentionally

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Semaphore;

use geofinder_core::{RequestOptions, ReverseGeoOptions, SearchOptions};

use crate::engine::CoreSearchEngine;
use crate::types::{CoreError, CoreSearchResponse, CoreSearchResult};

const DEFAULT_EVENT_TEMPLATE: &str = r#"{
    "event": "__event_name",
    "created": "2014-01-01T23:28:56.782Z",
    "userAgent": "custom-user-agent",
    "customField": "random-value"
}"#;

/// Stub engine returning a canned response for every operation
pub struct CoreSearchEngineStub {
    access_token: Mutex<String>,
    response: Mutex<Option<CoreSearchResponse>>,
    event_template: Mutex<String>,
    /// When set, every async operation waits for one `release()` call
    gate: Option<Arc<Semaphore>>,
    call_count: AtomicUsize,
    selected: Mutex<Vec<String>>,
}

impl CoreSearchEngineStub {
    pub fn new(access_token: &str) -> Self {
        Self {
            access_token: Mutex::new(access_token.to_string()),
            response: Mutex::new(None),
            event_template: Mutex::new(DEFAULT_EVENT_TEMPLATE.to_string()),
            gate: None,
            call_count: AtomicUsize::new(0),
            selected: Mutex::new(Vec::new()),
        }
    }

    /// Configure the response every operation returns
    pub fn with_response(self, response: CoreSearchResponse) -> Self {
        *self.response.lock().unwrap() = Some(response);
        self
    }

    /// Configure operations to deliver no response at all
    pub fn with_no_response(self) -> Self {
        *self.response.lock().unwrap() = None;
        self
    }

    /// Configure the raw event template handed to telemetry
    pub fn with_event_template(self, template: &str) -> Self {
        *self.event_template.lock().unwrap() = template.to_string();
        self
    }

    /// Hold every async operation until `release()` is called
    ///
    /// Waiters are released in request order (the semaphore is fair), so
    /// tests can interleave requests deterministically.
    pub fn gated(mut self) -> Self {
        self.gate = Some(Arc::new(Semaphore::new(0)));
        self
    }

    /// Release one held operation
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    /// Swap the canned response after construction
    pub fn set_response(&self, response: Option<CoreSearchResponse>) {
        *self.response.lock().unwrap() = response;
    }

    pub fn access_token(&self) -> String {
        self.access_token.lock().unwrap().clone()
    }

    /// Number of async operations performed so far
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// IDs reported through `on_selected`
    pub fn selected_ids(&self) -> Vec<String> {
        self.selected.lock().unwrap().clone()
    }

    async fn respond(&self) -> Option<CoreSearchResponse> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            // Permits are never returned; each release() admits one call
            gate.acquire().await.unwrap().forget();
        }
        self.response.lock().unwrap().clone()
    }
}

#[async_trait]
impl CoreSearchEngine for CoreSearchEngineStub {
    async fn search(
        &self,
        _query: &str,
        _categories: &[String],
        _options: &SearchOptions,
    ) -> Option<CoreSearchResponse> {
        self.respond().await
    }

    async fn resolve(
        &self,
        _result: &CoreSearchResult,
        _request: &RequestOptions,
    ) -> Option<CoreSearchResponse> {
        self.respond().await
    }

    async fn batch_resolve(
        &self,
        _results: &[CoreSearchResult],
        _request: &RequestOptions,
    ) -> Option<CoreSearchResponse> {
        self.respond().await
    }

    async fn reverse_geocoding(&self, _options: &ReverseGeoOptions) -> Option<CoreSearchResponse> {
        self.respond().await
    }

    fn on_selected(&self, _request: &RequestOptions, result: &CoreSearchResult) {
        self.selected.lock().unwrap().push(result.id.clone());
    }

    fn set_access_token(&self, token: &str) {
        *self.access_token.lock().unwrap() = token.to_string();
    }

    fn event_template(&self, event_name: &str) -> String {
        self.event_template
            .lock()
            .unwrap()
            .replace("__event_name", event_name)
    }

    fn feedback_template(
        &self,
        request: &RequestOptions,
        result: Option<&CoreSearchResult>,
    ) -> Result<String, CoreError> {
        let result_id = result.map_or("nope", |r| r.id.as_str());
        let result_index = result.and_then(|r| r.server_index).unwrap_or(-1);
        let selected_name = result.map_or("", CoreSearchResult::name);
        let language = result
            .and_then(|r| r.languages.first().cloned())
            .unwrap_or_else(|| "none".to_string());
        let proximity = request.options.proximity.map_or_else(
            || "[-1, -1]".to_string(),
            |point| format!("[{}, {}]", point.longitude, point.latitude),
        );

        Ok(format!(
            r#"{{
    "created": "2021-02-05T11:41:04+0300",
    "endpoint": "https://api.geofinder.dev/search/v1/",
    "event": "search.feedback",
    "language": ["{language}"],
    "proximity": {proximity},
    "queryString": "{query}",
    "resultId": "{result_id}",
    "resultIndex": {result_index},
    "schema": "search.feedback-2.1",
    "selectedItemName": "{selected_name}",
    "sessionIdentifier": "{session}",
    "userAgent": "search-sdk-rust"
}}"#,
            query = request.query,
            session = request.session_id,
        ))
    }
}

/// Canned fixtures shared across crate test suites
pub mod samples {
    use uuid::Uuid;

    use geofinder_core::{Address, Coordinate, RequestOptions, SearchOptions};

    use crate::types::{CoreError, CoreResultType, CoreSearchResponse, CoreSearchResult};

    pub const ERROR_DOMAIN: &str = "geofinder.core-search";

    pub fn sample_coordinate() -> Coordinate {
        Coordinate::new(53.89, 27.55)
    }

    pub fn sample_request(query: &str) -> RequestOptions {
        RequestOptions::new(query, SearchOptions::default())
    }

    fn base_result(id: &str, result_type: CoreResultType) -> CoreSearchResult {
        CoreSearchResult {
            id: id.to_string(),
            result_types: vec![result_type],
            names: vec![format!("name-{id}")],
            languages: vec!["en".to_string()],
            center: None,
            address: None,
            categories: None,
            icon_name: None,
            server_index: None,
            metadata: None,
            layer_id: None,
        }
    }

    /// A fully-resolved address candidate
    pub fn make_address(id: &str) -> CoreSearchResult {
        let mut result = base_result(id, CoreResultType::Address);
        result.center = Some(sample_coordinate());
        result.address = Some(Address {
            house_number: Some("740".to_string()),
            street: Some("15th St NW".to_string()),
            place: Some("Washington".to_string()),
            ..Address::default()
        });
        result
    }

    /// An unresolved POI candidate
    pub fn make_suggestion(id: &str) -> CoreSearchResult {
        base_result(id, CoreResultType::Poi)
    }

    /// A resolved POI candidate
    pub fn make_resolved_poi(id: &str) -> CoreSearchResult {
        let mut result = base_result(id, CoreResultType::Poi);
        result.center = Some(sample_coordinate());
        result.server_index = Some(0);
        result
    }

    /// A category drill-down candidate
    pub fn make_category(id: &str) -> CoreSearchResult {
        let mut result = base_result(id, CoreResultType::Category);
        result.center = Some(sample_coordinate());
        result.categories = Some(vec!["cafe".to_string()]);
        result
    }

    /// A query-refinement candidate
    pub fn make_query_suggestion(id: &str, refined_query: &str) -> CoreSearchResult {
        let mut result = base_result(id, CoreResultType::Query);
        result.names = vec![refined_query.to_string()];
        result
    }

    /// A user-record candidate originating from `layer_id`
    pub fn make_user_record(id: &str, layer_id: &str) -> CoreSearchResult {
        let mut result = base_result(id, CoreResultType::UserRecord);
        result.layer_id = Some(layer_id.to_string());
        result
    }

    /// Resolved and unresolved candidates in one response
    pub fn make_mixed_results_set() -> Vec<CoreSearchResult> {
        vec![
            make_suggestion("sample-poi-1"),
            make_address("sample-address-1"),
            make_category("sample-category-1"),
            make_resolved_poi("sample-poi-2"),
        ]
    }

    /// Unresolved candidates only
    pub fn make_suggestions_set() -> Vec<CoreSearchResult> {
        vec![make_suggestion("sample-poi-1"), make_suggestion("sample-poi-2")]
    }

    /// Resolved candidates only
    pub fn make_category_results_set() -> Vec<CoreSearchResult> {
        vec![make_category("sample-category-1"), make_category("sample-category-2")]
    }

    pub fn success_response(
        request: RequestOptions,
        results: Vec<CoreSearchResult>,
    ) -> CoreSearchResponse {
        CoreSearchResponse {
            request,
            response_uuid: Uuid::new_v4().to_string(),
            result: Ok(results),
        }
    }

    pub fn failure_response(request: RequestOptions) -> CoreSearchResponse {
        failure_response_with(
            request,
            CoreError {
                code: 500,
                domain: ERROR_DOMAIN.to_string(),
                message: "Server Internal error".to_string(),
            },
        )
    }

    pub fn failure_response_with(request: RequestOptions, error: CoreError) -> CoreSearchResponse {
        CoreSearchResponse {
            request,
            response_uuid: Uuid::new_v4().to_string(),
            result: Err(error),
        }
    }
}
