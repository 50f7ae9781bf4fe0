//! Geofinder local storage crate
//!
//! File-backed persistence for user records: a generic one-record-per-file
//! [`PersistentService`] and the [`LocalDataProvider`] layers for history
//! and favorites built on top of it.

pub mod error;
pub mod persistence;
pub mod providers;

// Re-export main types
pub use error::{StorageError, StorageResult};
pub use persistence::PersistentService;
pub use providers::{
    FAVORITES_LAYER_ID, FavoritesDataProvider, HISTORY_LAYER_ID, HistoryDataProvider,
    LocalDataProvider,
};
