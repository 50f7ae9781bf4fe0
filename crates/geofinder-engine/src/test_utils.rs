//! Test utilities for the search façade

// Allow test-specific patterns in stub implementation
#![allow(clippy::unwrap_used)] // Stubs can panic on lock poisoning
#![allow(clippy::expect_used)] // Test code can use expect
#![allow(clippy::missing_panics_doc)] // Test helpers panic intentionally

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::sync::mpsc;

use geofinder_core::{SearchResult, SearchSuggestion};

use crate::delegate::SearchEngineDelegate;
use crate::error::SearchError;

/// Events observed by [`DelegateStub`], in callback order
///
/// Suggestion/result payloads are reduced to their IDs; the stub keeps the
/// full values for assertions that need them.
#[derive(Debug, Clone)]
pub enum DelegateEvent {
    SuggestionsUpdated(Vec<String>),
    ResultResolved(String),
    ResultsResolved(Vec<String>),
    Failed(SearchError),
}

/// Delegate recording every callback and signalling it over a channel
pub struct DelegateStub {
    tx: mpsc::UnboundedSender<DelegateEvent>,
    resolved_result: Mutex<Option<SearchResult>>,
    resolved_results: Mutex<Vec<SearchResult>>,
    last_error: Mutex<Option<SearchError>>,
}

impl DelegateStub {
    /// Create a stub plus the receiving end tests await events on
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<DelegateEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Arc::new(Self {
                tx,
                resolved_result: Mutex::new(None),
                resolved_results: Mutex::new(Vec::new()),
                last_error: Mutex::new(None),
            }),
            rx,
        )
    }

    /// Most recently resolved single result
    pub fn resolved_result(&self) -> Option<SearchResult> {
        self.resolved_result.lock().unwrap().clone()
    }

    /// Most recently resolved batch
    pub fn resolved_results(&self) -> Vec<SearchResult> {
        self.resolved_results.lock().unwrap().clone()
    }

    /// Most recently reported error
    pub fn last_error(&self) -> Option<SearchError> {
        self.last_error.lock().unwrap().clone()
    }
}

impl SearchEngineDelegate for DelegateStub {
    fn suggestions_updated(&self, suggestions: &[SearchSuggestion]) {
        let ids = suggestions
            .iter()
            .map(|suggestion| suggestion.id().to_string())
            .collect();
        self.tx.send(DelegateEvent::SuggestionsUpdated(ids)).ok();
    }

    fn result_resolved(&self, result: &SearchResult) {
        *self.resolved_result.lock().unwrap() = Some(result.clone());
        self.tx
            .send(DelegateEvent::ResultResolved(result.id.clone()))
            .ok();
    }

    fn results_resolved(&self, results: &[SearchResult]) {
        *self.resolved_results.lock().unwrap() = results.to_vec();
        let ids = results.iter().map(|result| result.id.clone()).collect();
        self.tx.send(DelegateEvent::ResultsResolved(ids)).ok();
    }

    fn search_failed(&self, error: &SearchError) {
        *self.last_error.lock().unwrap() = Some(error.clone());
        self.tx.send(DelegateEvent::Failed(error.clone())).ok();
    }
}

/// Await the next delegate event, failing the test after five seconds
pub async fn next_event(rx: &mut mpsc::UnboundedReceiver<DelegateEvent>) -> DelegateEvent {
    tokio::time::timeout(Duration::from_secs(5), rx.recv())
        .await
        .expect("timed out waiting for delegate event")
        .expect("delegate channel closed")
}

/// Assert that no delegate event arrives within a short grace period
pub async fn assert_no_event(rx: &mut mpsc::UnboundedReceiver<DelegateEvent>) {
    let waited = tokio::time::timeout(Duration::from_millis(200), rx.recv()).await;
    assert!(waited.is_err(), "unexpected delegate event: {waited:?}");
}
