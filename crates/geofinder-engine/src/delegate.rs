//! Delegate trait the façade reports through

use geofinder_core::{SearchResult, SearchSuggestion};

use crate::error::SearchError;

/// Observer of search engine state changes
///
/// Callbacks are the only observable output of `search`/`select`; they are
/// invoked from the task driving the request, so implementations must be
/// cheap and thread-safe.
pub trait SearchEngineDelegate: Send + Sync {
    /// The suggestion list was replaced after a completed search
    fn suggestions_updated(&self, suggestions: &[SearchSuggestion]);

    /// A selected suggestion was resolved to exactly one result
    fn result_resolved(&self, result: &SearchResult);

    /// A batch of suggestions was resolved
    fn results_resolved(&self, results: &[SearchResult]);

    /// A request failed with a typed error
    fn search_failed(&self, error: &SearchError);
}
