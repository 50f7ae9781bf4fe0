//! Local record layers for history and favorites

use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde::de::DeserializeOwned;

use geofinder_core::{FavoriteRecord, HistoryRecord, HistoryRecorder, IndexableRecord, RecordLayer};

use crate::error::StorageResult;
use crate::persistence::PersistentService;

/// Layer identifier of the built-in history provider
pub const HISTORY_LAYER_ID: &str = "history";
/// Layer identifier of the built-in favorites provider
pub const FAVORITES_LAYER_ID: &str = "favorites";

/// File-backed collection of user records forming a record layer
///
/// Records are kept in insertion order and persisted as one JSON document
/// through a [`PersistentService`]; `add` upserts by record ID.
pub struct LocalDataProvider<R> {
    layer_id: String,
    service: PersistentService<Vec<R>>,
    records: Mutex<Vec<R>>,
}

/// The built-in search history layer
pub type HistoryDataProvider = LocalDataProvider<HistoryRecord>;
/// The built-in favorites layer
pub type FavoritesDataProvider = LocalDataProvider<FavoriteRecord>;

impl<R> LocalDataProvider<R>
where
    R: IndexableRecord + Serialize + DeserializeOwned + Clone + 'static,
{
    /// Create a provider over `service`, loading whatever it already holds
    pub fn new(layer_id: &str, service: PersistentService<Vec<R>>) -> Self {
        let records = service.load().unwrap_or_default();
        Self {
            layer_id: layer_id.to_string(),
            service,
            records: Mutex::new(records),
        }
    }

    /// Records in insertion order
    pub fn records(&self) -> Vec<R> {
        self.records
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }

    /// Insert or replace a record by its ID
    ///
    /// # Errors
    ///
    /// Fails when persisting the updated collection fails; the in-memory
    /// collection is updated regardless.
    pub fn add(&self, record: R) -> StorageResult<()> {
        self.mutate(|records| {
            records.retain(|existing| existing.id() != record.id());
            records.push(record);
        })
    }

    /// Remove a record by its ID
    ///
    /// # Errors
    ///
    /// Fails when persisting the updated collection fails.
    pub fn delete(&self, id: &str) -> StorageResult<()> {
        self.mutate(|records| records.retain(|existing| existing.id() != id))
    }

    /// Drop every record and the backing file
    ///
    /// # Errors
    ///
    /// Fails when the backing file cannot be removed.
    pub fn clear(&self) -> StorageResult<()> {
        if let Ok(mut guard) = self.records.lock() {
            guard.clear();
        }
        self.service.clear()
    }

    fn mutate(&self, apply: impl FnOnce(&mut Vec<R>)) -> StorageResult<()> {
        let snapshot = {
            let Ok(mut guard) = self.records.lock() else {
                return Ok(());
            };
            apply(&mut guard);
            guard.clone()
        };
        self.service.save(&snapshot)
    }
}

impl<R> RecordLayer for LocalDataProvider<R>
where
    R: IndexableRecord + Serialize + DeserializeOwned + Clone + 'static,
{
    fn layer_id(&self) -> &str {
        &self.layer_id
    }

    fn record(&self, id: &str) -> Option<Arc<dyn IndexableRecord>> {
        self.records
            .lock()
            .ok()?
            .iter()
            .find(|record| record.id() == id)
            .map(|record| Arc::new(record.clone()) as Arc<dyn IndexableRecord>)
    }
}

impl HistoryRecorder for HistoryDataProvider {
    fn record_selection(&self, record: HistoryRecord) {
        if let Err(error) = self.add(record) {
            tracing::warn!(%error, "failed to persist history record");
        }
    }
}

impl HistoryDataProvider {
    /// History provider in the platform's local data directory
    ///
    /// # Errors
    ///
    /// Fails when the storage directory is unavailable.
    pub fn open_default() -> StorageResult<Self> {
        Ok(Self::new(
            HISTORY_LAYER_ID,
            PersistentService::in_default_directory("history.records")?,
        ))
    }
}

impl FavoritesDataProvider {
    /// Favorites provider in the platform's local data directory
    ///
    /// # Errors
    ///
    /// Fails when the storage directory is unavailable.
    pub fn open_default() -> StorageResult<Self> {
        Ok(Self::new(
            FAVORITES_LAYER_ID,
            PersistentService::in_default_directory("favorites.records")?,
        ))
    }
}
