//! Test utilities for the telemetry pipeline

// Allow test-specific patterns in stub implementation
#![allow(clippy::unwrap_used)] // Stubs can panic on lock poisoning

use std::sync::{Arc, Mutex};

use geofinder_core::{BoundingBox, LocationProvider};

use crate::error::TelemetryError;
use crate::events::{TelemetryEvent, TelemetrySink};

/// Sink collecting enqueued events and reported errors in memory
///
/// `flush` drains the queue, mimicking a sink that hands its batch to the
/// backend.
#[derive(Default)]
pub struct TelemetrySinkStub {
    enqueued: Mutex<Vec<TelemetryEvent>>,
    reported: Mutex<Vec<String>>,
}

impl TelemetrySinkStub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Events still waiting in the queue
    pub fn enqueued_events(&self) -> Vec<TelemetryEvent> {
        self.enqueued.lock().unwrap().clone()
    }

    /// The most recently enqueued event
    pub fn last_event(&self) -> Option<TelemetryEvent> {
        self.enqueued.lock().unwrap().last().cloned()
    }

    /// Rendered errors reported through the error channel
    pub fn reported_errors(&self) -> Vec<String> {
        self.reported.lock().unwrap().clone()
    }
}

impl TelemetrySink for TelemetrySinkStub {
    fn enqueue(&self, event: TelemetryEvent) {
        self.enqueued.lock().unwrap().push(event);
    }

    fn report_error(&self, error: &TelemetryError) {
        self.reported.lock().unwrap().push(error.to_string());
    }

    fn flush(&self) {
        self.enqueued.lock().unwrap().clear();
    }
}

/// Location provider with a settable viewport
#[derive(Default)]
pub struct LocationProviderStub {
    viewport: Mutex<Option<BoundingBox>>,
}

impl LocationProviderStub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_viewport(&self, viewport: Option<BoundingBox>) {
        *self.viewport.lock().unwrap() = viewport;
    }
}

impl LocationProvider for LocationProviderStub {
    fn viewport(&self) -> Option<BoundingBox> {
        *self.viewport.lock().unwrap()
    }
}
