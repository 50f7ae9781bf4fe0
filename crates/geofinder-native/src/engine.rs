//! The engine trait the façade calls through

use async_trait::async_trait;

use geofinder_core::{RequestOptions, ReverseGeoOptions, SearchOptions};

use crate::types::{CoreError, CoreSearchResponse, CoreSearchResult};

/// Single-shot async operations exposed by the underlying engine
///
/// Every call delivers at most one response; `None` means the engine
/// produced no usable payload at all (the caller surfaces that as a
/// processing failure, it is never a valid empty result).
#[async_trait]
pub trait CoreSearchEngine: Send + Sync {
    /// Forward-geocoding search for a query and optional category filter
    async fn search(
        &self,
        query: &str,
        categories: &[String],
        options: &SearchOptions,
    ) -> Option<CoreSearchResponse>;

    /// Resolve a single candidate from an earlier search to a full result
    async fn resolve(
        &self,
        result: &CoreSearchResult,
        request: &RequestOptions,
    ) -> Option<CoreSearchResponse>;

    /// Resolve a batch of candidates in one round trip
    async fn batch_resolve(
        &self,
        results: &[CoreSearchResult],
        request: &RequestOptions,
    ) -> Option<CoreSearchResponse>;

    /// Resolve a coordinate into the places containing it
    async fn reverse_geocoding(&self, options: &ReverseGeoOptions) -> Option<CoreSearchResponse>;

    /// Tell the engine a candidate was selected, for its own ranking feedback
    fn on_selected(&self, request: &RequestOptions, result: &CoreSearchResult);

    /// Rotate the access token used for subsequent requests
    fn set_access_token(&self, token: &str);

    /// JSON event template for a named telemetry event
    ///
    /// The returned string is engine-defined; callers must treat it as
    /// untrusted input and validate it parses to a JSON object.
    fn event_template(&self, event_name: &str) -> String;

    /// JSON feedback template for a request/result pair
    ///
    /// # Errors
    ///
    /// Returns the engine's error triple when it cannot build a template
    /// for the given pair.
    fn feedback_template(
        &self,
        request: &RequestOptions,
        result: Option<&CoreSearchResult>,
    ) -> Result<String, CoreError>;
}
