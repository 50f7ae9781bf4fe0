//! Raw feedback events: the attribute mapping in wire form

use serde_json::{Map, Value, json};

use crate::error::TelemetryResult;

const REASON_KEY: &str = "feedbackReason";
const TEXT_KEY: &str = "feedbackText";
const KEYBOARD_LOCALE_KEY: &str = "keyboardLocale";

/// A feedback event reduced to its attribute mapping
///
/// Raw events exist so hosts can persist feedback (e.g. while offline) and
/// submit it later: attributes → JSON → attributes round-trips losslessly,
/// and the reason/text fields stay editable.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFeedbackEvent {
    attributes: Map<String, Value>,
}

impl RawFeedbackEvent {
    pub const fn from_attributes(attributes: Map<String, Value>) -> Self {
        Self { attributes }
    }

    /// Parse a serialized event; `None` unless the payload is a JSON object
    pub fn from_json(data: &[u8]) -> Option<Self> {
        match serde_json::from_slice::<Value>(data) {
            Ok(Value::Object(attributes)) => Some(Self { attributes }),
            _ => None,
        }
    }

    pub const fn attributes(&self) -> &Map<String, Value> {
        &self.attributes
    }

    pub fn reason(&self) -> Option<&str> {
        self.attributes.get(REASON_KEY).and_then(Value::as_str)
    }

    pub fn set_reason(&mut self, reason: &str) {
        self.attributes.insert(REASON_KEY.to_string(), json!(reason));
    }

    pub fn text(&self) -> Option<&str> {
        self.attributes.get(TEXT_KEY).and_then(Value::as_str)
    }

    pub fn set_text(&mut self, text: &str) {
        self.attributes.insert(TEXT_KEY.to_string(), json!(text));
    }

    pub fn keyboard_locale(&self) -> Option<&str> {
        self.attributes
            .get(KEYBOARD_LOCALE_KEY)
            .and_then(Value::as_str)
    }

    /// Serialize the attribute mapping
    ///
    /// # Errors
    ///
    /// Fails when an attribute value cannot be serialized (which plain JSON
    /// values never do in practice).
    pub fn to_json(&self) -> TelemetryResult<Vec<u8>> {
        Ok(serde_json::to_vec(&self.attributes)?)
    }
}
