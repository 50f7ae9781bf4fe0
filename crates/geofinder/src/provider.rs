//! Wiring of the SDK's moving parts

use std::sync::Arc;

use thiserror::Error;

use geofinder_config::{ApplicationConfig, ConfigError};
use geofinder_core::{LocationProvider, RecordLayer};
use geofinder_engine::{SearchEngine, SearchEngineDelegate};
use geofinder_native::CoreSearchEngine;
use geofinder_storage::{
    FAVORITES_LAYER_ID, FavoritesDataProvider, HISTORY_LAYER_ID, HistoryDataProvider,
    PersistentService, StorageError,
};
use geofinder_telemetry::{EventsManager, FeedbackManager, TelemetrySink};

/// Errors raised while assembling the SDK
#[derive(Debug, Error)]
pub enum SdkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Owns the local record layers and builds the SDK's services
///
/// One provider per configuration; engines and managers built from it
/// share the same history and favorites layers.
pub struct ServiceProvider {
    config: ApplicationConfig,
    history: Arc<HistoryDataProvider>,
    favorites: Arc<FavoritesDataProvider>,
}

impl ServiceProvider {
    /// Validate the configuration and open the local record layers
    ///
    /// # Errors
    ///
    /// Fails when the configuration is invalid or the storage directory is
    /// unavailable.
    pub fn new(config: ApplicationConfig) -> Result<Self, SdkError> {
        config.validate()?;

        let (history, favorites) = match &config.storage.directory {
            Some(directory) => (
                HistoryDataProvider::new(
                    HISTORY_LAYER_ID,
                    PersistentService::new(directory, "history.records")?,
                ),
                FavoritesDataProvider::new(
                    FAVORITES_LAYER_ID,
                    PersistentService::new(directory, "favorites.records")?,
                ),
            ),
            None => (
                HistoryDataProvider::open_default()?,
                FavoritesDataProvider::open_default()?,
            ),
        };

        Ok(Self {
            config,
            history: Arc::new(history),
            favorites: Arc::new(favorites),
        })
    }

    pub fn config(&self) -> &ApplicationConfig {
        &self.config
    }

    /// The local search history layer
    pub fn history(&self) -> Arc<HistoryDataProvider> {
        Arc::clone(&self.history)
    }

    /// The local favorites layer
    pub fn favorites(&self) -> Arc<FavoritesDataProvider> {
        Arc::clone(&self.favorites)
    }

    /// Build a search façade over `core`, wired to the local record layers
    pub fn search_engine(
        &self,
        core: Arc<dyn CoreSearchEngine>,
        delegate: Arc<dyn SearchEngineDelegate>,
    ) -> SearchEngine {
        core.set_access_token(&self.config.engine.access_token);

        let layers: Vec<Arc<dyn RecordLayer>> = vec![
            Arc::clone(&self.history) as _,
            Arc::clone(&self.favorites) as _,
        ];
        SearchEngine::with_providers(
            core,
            delegate,
            self.config.engine.default_search_options(),
            layers,
            Some(Arc::clone(&self.history) as _),
        )
    }

    /// Build a feedback manager submitting to `sink`
    pub fn feedback_manager(
        &self,
        core: Arc<dyn CoreSearchEngine>,
        sink: Arc<dyn TelemetrySink>,
        location: Arc<dyn LocationProvider>,
    ) -> FeedbackManager {
        FeedbackManager::new(EventsManager::new(sink), core, location)
    }
}
