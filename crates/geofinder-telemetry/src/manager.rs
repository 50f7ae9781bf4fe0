//! Feedback manager: template merge and submission

use std::sync::Arc;

use serde_json::{Value, json};

use geofinder_core::LocationProvider;
use geofinder_native::CoreSearchEngine;

use crate::error::{TelemetryError, TelemetryResult};
use crate::events::{EventsManager, TelemetryEventKind};
use crate::feedback::FeedbackEvent;
use crate::raw::RawFeedbackEvent;

/// Builds raw feedback events and submits them through the events manager
///
/// The engine supplies a base event template; the event's own attributes
/// are merged over it, so the template can never override what the SDK
/// derived from the source object.
pub struct FeedbackManager {
    events: EventsManager,
    engine: Arc<dyn CoreSearchEngine>,
    location: Arc<dyn LocationProvider>,
}

impl FeedbackManager {
    pub fn new(
        events: EventsManager,
        engine: Arc<dyn CoreSearchEngine>,
        location: Arc<dyn LocationProvider>,
    ) -> Self {
        Self {
            events,
            engine,
            location,
        }
    }

    /// Build and submit a feedback event
    ///
    /// # Errors
    ///
    /// [`TelemetryError::IncorrectEventTemplate`] when the engine template
    /// does not parse to a JSON object; the error is also reported through
    /// the sink's error channel and nothing is enqueued.
    #[tracing::instrument(skip(self, event), fields(reason = event.reason().as_str()))]
    pub fn send_event(&self, event: &FeedbackEvent, auto_flush: bool) -> TelemetryResult<()> {
        let raw = self.build_raw_event(event)?;
        self.send_raw_event(&raw, auto_flush)
    }

    /// Merge the engine template with the event's attributes
    ///
    /// # Errors
    ///
    /// [`TelemetryError::IncorrectEventTemplate`] when the engine template
    /// does not parse to a JSON object.
    pub fn build_raw_event(&self, event: &FeedbackEvent) -> TelemetryResult<RawFeedbackEvent> {
        // Sources that originate from a request use the engine's dedicated
        // feedback template; everything else gets the generic one.
        let template = match event.request() {
            Some(request) => match self.engine.feedback_template(request, None) {
                Ok(template) => template,
                Err(error) => {
                    tracing::warn!(
                        code = error.code,
                        domain = %error.domain,
                        "engine failed to build a feedback template"
                    );
                    let error = TelemetryError::IncorrectEventTemplate;
                    self.events.report_error(&error);
                    return Err(error);
                }
            },
            None => self
                .engine
                .event_template(TelemetryEventKind::Feedback.name()),
        };

        let Ok(Value::Object(mut attributes)) = serde_json::from_str::<Value>(&template) else {
            let error = TelemetryError::IncorrectEventTemplate;
            self.events.report_error(&error);
            return Err(error);
        };

        for (key, value) in event.attributes(self.location.viewport()) {
            attributes.insert(key, value);
        }

        if let Some(session_id) = &event.session_id {
            attributes.insert("appMetadata".to_string(), json!({ "sessionId": session_id }));
        }

        Ok(RawFeedbackEvent::from_attributes(attributes))
    }

    /// Submit an already-built raw event
    ///
    /// # Errors
    ///
    /// Currently infallible; kept fallible for parity with `send_event`
    /// call sites that persist raw events.
    pub fn send_raw_event(&self, raw: &RawFeedbackEvent, auto_flush: bool) -> TelemetryResult<()> {
        self.events
            .send_event(TelemetryEventKind::Feedback, raw.attributes().clone(), auto_flush);
        Ok(())
    }
}
