//! Provider traits the SDK host wires in

use std::sync::Arc;

use crate::geo::{BoundingBox, Coordinate};
use crate::record::{HistoryRecord, IndexableRecord};

/// Source of the device location and current map viewport
///
/// Both are optional; telemetry simply omits the corresponding attributes
/// when the host has nothing to report.
pub trait LocationProvider: Send + Sync {
    fn current_location(&self) -> Option<Coordinate> {
        None
    }

    /// Viewport the user is currently looking at
    fn viewport(&self) -> Option<BoundingBox> {
        None
    }
}

/// Location provider that reports nothing
///
/// Useful for headless hosts and tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultLocationProvider;

impl LocationProvider for DefaultLocationProvider {}

/// A named layer of user records the engine can match against
///
/// The engine tags raw results originating from a record layer with the
/// layer identifier; the façade uses this trait to materialize the record
/// behind such a result.
pub trait RecordLayer: Send + Sync {
    /// Stable identifier of the layer ("history", "favorites", …)
    fn layer_id(&self) -> &str;

    /// Look up a record by its identifier
    fn record(&self, id: &str) -> Option<Arc<dyn IndexableRecord>>;
}

/// Sink for selections the façade should remember as search history
///
/// Persistence failures are the implementor's to report; selection flow
/// never fails because history could not be written.
pub trait HistoryRecorder: Send + Sync {
    fn record_selection(&self, record: HistoryRecord);
}
