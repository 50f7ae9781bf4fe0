//! Geofinder search façade crate
//!
//! This crate provides the user-facing [`SearchEngine`]: it forwards
//! queries to the underlying engine, discards responses to superseded
//! requests, transforms raw responses into typed suggestions and results,
//! and republishes state through a delegate.

pub mod delegate;
pub mod error;
pub mod response;
pub mod searching;

// Re-export main types
pub use delegate::SearchEngineDelegate;
pub use error::SearchError;
pub use response::{ProcessedResponse, SearchResponse};
pub use searching::SearchEngine;

// Re-export test utilities when test-utils feature is enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
