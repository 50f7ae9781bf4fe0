//! Feedback events built from domain objects

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use serde_json::{Map, Value, json};

use geofinder_core::{
    Address, AddressFormatStyle, BoundingBox, IndexableRecord, RequestOptions, ResponseContext,
    SearchResult, SearchSuggestion,
};

use crate::events::TelemetryEventKind;

/// Placeholder for sources that carry no address
pub const NO_ADDRESS_PLACEHOLDER: &str = "<No address>";

/// Why the user is sending feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackReason {
    IncorrectName,
    IncorrectLocation,
    IncorrectAddress,
    CannotFind,
    /// Free-form reason supplied by the host application
    Custom(String),
}

impl FeedbackReason {
    /// Wire name used in the `feedbackReason` attribute
    pub fn as_str(&self) -> &str {
        match self {
            Self::IncorrectName => "incorrect_name",
            Self::IncorrectLocation => "incorrect_location",
            Self::IncorrectAddress => "incorrect_address",
            Self::CannotFind => "cannot_find",
            Self::Custom(reason) => reason,
        }
    }
}

impl From<&str> for FeedbackReason {
    fn from(reason: &str) -> Self {
        Self::Custom(reason.to_string())
    }
}

/// Snapshot of a user record taken when the event was built
#[derive(Debug, Clone)]
struct RecordSnapshot {
    id: String,
    address: Option<Address>,
}

#[derive(Debug, Clone)]
enum FeedbackSource {
    Result(Box<SearchResult>),
    Suggestion(Box<SearchSuggestion>),
    Record(RecordSnapshot),
    /// "Cannot find" feedback about a whole response
    Response(ResponseContext),
}

/// A single piece of user feedback about a search interaction
///
/// Built from a source object plus a reason/text pair; free-form device
/// context can be attached before sending. The attribute vocabulary is
/// fixed; attributes whose source data is missing are omitted, except for
/// the documented placeholders.
#[derive(Debug, Clone)]
pub struct FeedbackEvent {
    source: FeedbackSource,
    reason: FeedbackReason,
    text: Option<String>,
    pub keyboard_locale: Option<String>,
    pub device_orientation: Option<String>,
    pub screenshot_data: Option<Vec<u8>>,
    /// Host-assigned session identifier carried in `appMetadata`
    pub session_id: Option<String>,
}

impl FeedbackEvent {
    fn new(source: FeedbackSource, reason: FeedbackReason, text: Option<&str>) -> Self {
        Self {
            source,
            reason,
            text: text.map(str::to_string),
            keyboard_locale: None,
            device_orientation: None,
            screenshot_data: None,
            session_id: None,
        }
    }

    /// Feedback about a resolved result
    pub fn from_result(
        result: &SearchResult,
        reason: impl Into<FeedbackReason>,
        text: Option<&str>,
    ) -> Self {
        Self::new(
            FeedbackSource::Result(Box::new(result.clone())),
            reason.into(),
            text,
        )
    }

    /// Feedback about a suggestion that was never resolved
    pub fn from_suggestion(
        suggestion: &SearchSuggestion,
        reason: impl Into<FeedbackReason>,
        text: Option<&str>,
    ) -> Self {
        Self::new(
            FeedbackSource::Suggestion(Box::new(suggestion.clone())),
            reason.into(),
            text,
        )
    }

    /// Feedback about a user record (favorite, history entry, …)
    pub fn from_record(
        record: &dyn IndexableRecord,
        reason: impl Into<FeedbackReason>,
        text: Option<&str>,
    ) -> Self {
        Self::new(
            FeedbackSource::Record(RecordSnapshot {
                id: record.id().to_string(),
                address: record.address().cloned(),
            }),
            reason.into(),
            text,
        )
    }

    /// "Cannot find what I searched for" feedback about a whole response
    pub fn cannot_find(context: &ResponseContext, text: Option<&str>) -> Self {
        Self::new(
            FeedbackSource::Response(context.clone()),
            FeedbackReason::CannotFind,
            text,
        )
    }

    pub fn reason(&self) -> &FeedbackReason {
        &self.reason
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    /// The request the feedback is about, when the source carries one
    pub(crate) fn request(&self) -> Option<&RequestOptions> {
        self.context().map(|context| &context.request)
    }

    fn context(&self) -> Option<&ResponseContext> {
        match &self.source {
            FeedbackSource::Result(result) => result.context.as_ref(),
            FeedbackSource::Suggestion(suggestion) => Some(suggestion.context()),
            FeedbackSource::Record(_) => None,
            FeedbackSource::Response(context) => Some(context),
        }
    }

    fn selected_item_name(&self) -> Option<String> {
        match &self.source {
            FeedbackSource::Result(result) => Some(result.name.clone()),
            FeedbackSource::Suggestion(suggestion) => Some(suggestion.name().to_string()),
            FeedbackSource::Record(record) => Some(
                record
                    .address
                    .as_ref()
                    .and_then(|address| address.formatted_address(AddressFormatStyle::Full))
                    .unwrap_or_else(|| NO_ADDRESS_PLACEHOLDER.to_string()),
            ),
            FeedbackSource::Response(_) => None,
        }
    }

    fn result_id(&self) -> Option<&str> {
        match &self.source {
            FeedbackSource::Result(result) => Some(&result.id),
            FeedbackSource::Suggestion(suggestion) => Some(suggestion.id()),
            FeedbackSource::Record(record) => Some(&record.id),
            FeedbackSource::Response(_) => None,
        }
    }

    fn result_index(&self) -> Option<i64> {
        match &self.source {
            FeedbackSource::Result(result) => Some(result.server_index.unwrap_or(-1)),
            FeedbackSource::Suggestion(suggestion) => Some(suggestion.server_index().unwrap_or(-1)),
            FeedbackSource::Record(_) => Some(-1),
            FeedbackSource::Response(_) => None,
        }
    }

    fn languages(&self) -> Option<Vec<String>> {
        match &self.source {
            FeedbackSource::Result(result) => result.languages.clone(),
            FeedbackSource::Suggestion(suggestion) => match suggestion.as_ref() {
                SearchSuggestion::Server(server) => server.languages.clone(),
                _ => None,
            },
            _ => None,
        }
    }

    /// Event-specific attributes, merged over the engine template by the
    /// feedback manager
    pub(crate) fn attributes(&self, viewport: Option<BoundingBox>) -> Map<String, Value> {
        let mut attributes = Map::new();

        if let Some(context) = self.context() {
            attributes.insert("queryString".to_string(), json!(context.request.query));
            attributes.insert(
                "sessionIdentifier".to_string(),
                json!(context.request.session_id.to_string()),
            );
            attributes.insert("responseUuid".to_string(), json!(context.response_uuid));

            let options = &context.request.options;
            if let Some(countries) = &options.countries {
                attributes.insert("country".to_string(), json!(countries));
            }
            if let Some(fuzzy_match) = options.fuzzy_match {
                attributes.insert("fuzzyMatch".to_string(), json!(fuzzy_match));
            }
            if let Some(limit) = options.limit {
                attributes.insert("limit".to_string(), json!(limit));
            }
            if let Some(types) = &options.result_types {
                let names: Vec<&str> = types.iter().map(|kind| kind.as_str()).collect();
                attributes.insert("types".to_string(), json!(names));
            }
            if let Some(proximity) = options.proximity {
                attributes.insert(
                    "proximity".to_string(),
                    json!([proximity.longitude, proximity.latitude]),
                );
            }
            if let Some(bbox) = options.bounding_box {
                attributes.insert(
                    "bbox".to_string(),
                    json!([
                        bbox.min.longitude,
                        bbox.min.latitude,
                        bbox.max.longitude,
                        bbox.max.latitude
                    ]),
                );
            }
        }

        if let Some(name) = self.selected_item_name() {
            attributes.insert("selectedItemName".to_string(), json!(name));
        }
        if let Some(id) = self.result_id() {
            attributes.insert("resultId".to_string(), json!(id));
        }
        if let Some(index) = self.result_index() {
            attributes.insert("resultIndex".to_string(), json!(index));
        }
        if let Some(languages) = self.languages() {
            attributes.insert("language".to_string(), json!(languages));
        }

        attributes.insert("feedbackReason".to_string(), json!(self.reason.as_str()));
        if let Some(text) = &self.text {
            attributes.insert("feedbackText".to_string(), json!(text));
        }

        if let Some(locale) = &self.keyboard_locale {
            attributes.insert("keyboardLocale".to_string(), json!(locale));
        }
        if let Some(orientation) = &self.device_orientation {
            attributes.insert("orientation".to_string(), json!(orientation));
        }
        if let Some(screenshot) = &self.screenshot_data {
            attributes.insert("screenshot".to_string(), json!(BASE64.encode(screenshot)));
        }

        if let Some(viewport) = viewport {
            let center = viewport.center();
            attributes.insert("mapZoom".to_string(), json!(viewport.map_zoom()));
            attributes.insert("mapCenterLatitude".to_string(), json!(center.latitude));
            attributes.insert("mapCenterLongitude".to_string(), json!(center.longitude));
        }

        attributes.insert(
            "schema".to_string(),
            json!(TelemetryEventKind::Feedback.schema()),
        );

        attributes
    }
}
