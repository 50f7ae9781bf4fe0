//! Telemetry events and the sink boundary

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::error::TelemetryError;

/// Event kinds this SDK emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TelemetryEventKind {
    Feedback,
}

impl TelemetryEventKind {
    /// Wire name of the event
    pub const fn name(self) -> &'static str {
        match self {
            Self::Feedback => "search.feedback",
        }
    }

    /// Schema version of the event payload
    pub const fn version(self) -> &'static str {
        match self {
            Self::Feedback => "2.1",
        }
    }

    /// Combined schema identifier, e.g. `search.feedback-2.1`
    pub fn schema(self) -> String {
        format!("{}-{}", self.name(), self.version())
    }
}

/// A named event with a flat attribute mapping
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryEvent {
    pub name: String,
    pub attributes: Map<String, Value>,
}

/// Downstream sink events are submitted to
///
/// Implementations own batching and transport; `flush` pushes everything
/// enqueued so far to the backend. Errors travel on a separate channel so
/// a broken event never blocks the queue.
pub trait TelemetrySink: Send + Sync {
    fn enqueue(&self, event: TelemetryEvent);

    fn report_error(&self, error: &TelemetryError);

    fn flush(&self);
}

/// Thin dispatcher putting events onto the sink
#[derive(Clone)]
pub struct EventsManager {
    sink: Arc<dyn TelemetrySink>,
}

impl EventsManager {
    pub fn new(sink: Arc<dyn TelemetrySink>) -> Self {
        Self { sink }
    }

    /// Enqueue an event, optionally flushing the sink right away
    pub fn send_event(
        &self,
        kind: TelemetryEventKind,
        attributes: Map<String, Value>,
        auto_flush: bool,
    ) {
        tracing::debug!(event = kind.name(), auto_flush, "enqueueing telemetry event");
        self.sink.enqueue(TelemetryEvent {
            name: kind.name().to_string(),
            attributes,
        });
        if auto_flush {
            self.sink.flush();
        }
    }

    /// Report a telemetry-level failure without touching the event queue
    pub fn report_error(&self, error: &TelemetryError) {
        tracing::warn!(%error, "telemetry error");
        self.sink.report_error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::TelemetryEventKind;

    #[test]
    fn test_feedback_schema() {
        assert_eq!(TelemetryEventKind::Feedback.name(), "search.feedback");
        assert_eq!(TelemetryEventKind::Feedback.schema(), "search.feedback-2.1");
    }
}
