//! Protocol boundary to the bundled search engine
//!
//! The actual search/geocoding engine is an external dependency; this crate
//! defines the raw types it speaks ([`CoreSearchResult`],
//! [`CoreSearchResponse`]) and the [`CoreSearchEngine`] trait the façade
//! calls through. A canned stub engine is available behind the
//! `test-utils` feature.

pub mod engine;
pub mod types;

// Re-export main types
pub use engine::CoreSearchEngine;
pub use types::{CoreError, CoreResultType, CoreSearchResponse, CoreSearchResult};

// Re-export test utilities when test-utils feature is enabled
#[cfg(any(test, feature = "test-utils"))]
pub mod stub;
