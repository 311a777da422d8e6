//! Voice-Platform Envelope Models
//!
//! This module defines the request and response envelopes of the voice
//! platform's skill contract, plus builders for the "tell" and "ask"
//! response shapes. Wire names follow the platform's JSON format, so the
//! Rust-side names are mapped with serde attributes throughout.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Envelope version understood and emitted by this service.
pub const ENVELOPE_VERSION: &str = "1.0";

/// The inbound request envelope.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    pub version: String,
    pub session: SessionInfo,
    pub request: Request,
}

/// Conversational session context carried with every request.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionInfo {
    pub session_id: String,
    #[serde(default)]
    pub new: bool,
    /// Opaque key-value state echoed back from the previous turn's response.
    #[serde(default)]
    #[schema(value_type = Object)]
    pub attributes: Map<String, Value>,
    pub application: Option<Application>,
}

/// Identifies the skill the platform routed this request to.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

/// The platform request, tagged by its `type` field.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum Request {
    /// The user opened the skill without a specific request.
    LaunchRequest { request_id: String },
    /// The user spoke a recognized intent.
    IntentRequest { request_id: String, intent: Intent },
    /// The platform ended the session; no speech is expected back.
    SessionEndedRequest {
        request_id: String,
        reason: Option<String>,
    },
}

/// A named user request with its extracted slot values.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Intent {
    pub name: String,
    #[serde(default)]
    pub slots: HashMap<String, Slot>,
}

impl Intent {
    /// Returns the spoken value of a slot, if the platform filled it.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|slot| slot.value.as_deref())
    }
}

/// A named parameter extracted from spoken input.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct Slot {
    pub name: String,
    pub value: Option<String>,
}

/// The outbound response envelope.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    /// Session state for the next turn to consume. Omitted when empty.
    #[serde(skip_serializing_if = "Map::is_empty")]
    #[schema(value_type = Object)]
    pub session_attributes: Map<String, Value>,
    pub response: ResponseBody,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Card>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    pub should_end_session: bool,
}

/// Plain-text speech rendered by the platform.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OutputSpeech {
    #[serde(rename = "type")]
    pub speech_type: String,
    pub text: String,
}

impl OutputSpeech {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            speech_type: "PlainText".to_string(),
            text: text.into(),
        }
    }
}

/// A simple visual card shown in the companion app.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Card {
    #[serde(rename = "type")]
    pub card_type: String,
    pub title: String,
    pub content: String,
}

/// Speech spoken when the user does not answer an ask-response.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// The body of an HTTP-level error reply.
#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
}

impl ResponseEnvelope {
    /// A terminal spoken response.
    pub fn tell(text: impl Into<String>) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: Map::new(),
            response: ResponseBody {
                output_speech: Some(OutputSpeech::plain(text)),
                card: None,
                reprompt: None,
                should_end_session: true,
            },
        }
    }

    /// A terminal spoken response with a visual card.
    pub fn tell_with_card(
        text: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut envelope = Self::tell(text);
        envelope.response.card = Some(Card {
            card_type: "Simple".to_string(),
            title: title.into(),
            content: content.into(),
        });
        envelope
    }

    /// A spoken prompt expecting a further turn, carrying session state for
    /// that turn to consume.
    pub fn ask(
        prompt: impl Into<String>,
        reprompt: impl Into<String>,
        session_attributes: Map<String, Value>,
    ) -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes,
            response: ResponseBody {
                output_speech: Some(OutputSpeech::plain(prompt)),
                card: None,
                reprompt: Some(Reprompt {
                    output_speech: OutputSpeech::plain(reprompt),
                }),
                should_end_session: false,
            },
        }
    }

    /// The empty acknowledgement for lifecycle events with no speech.
    pub fn empty() -> Self {
        Self {
            version: ENVELOPE_VERSION.to_string(),
            session_attributes: Map::new(),
            response: ResponseBody {
                output_speech: None,
                card: None,
                reprompt: None,
                should_end_session: true,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_request_deserialization() {
        let json = r#"{
            "version": "1.0",
            "session": {
                "sessionId": "session-1234",
                "new": false,
                "attributes": {"arrivals": {"shady grove": ["5", "12"]}},
                "application": {"applicationId": "amzn1.ask.skill.test"}
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "request-5678",
                "intent": {
                    "name": "GetStation",
                    "slots": {
                        "station": {"name": "station", "value": "metro center"}
                    }
                }
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.version, "1.0");
        assert_eq!(envelope.session.session_id, "session-1234");
        assert!(envelope.session.attributes.contains_key("arrivals"));
        assert_eq!(
            envelope
                .session
                .application
                .as_ref()
                .unwrap()
                .application_id,
            "amzn1.ask.skill.test"
        );

        match &envelope.request {
            Request::IntentRequest { request_id, intent } => {
                assert_eq!(request_id, "request-5678");
                assert_eq!(intent.name, "GetStation");
                assert_eq!(intent.slot_value("station"), Some("metro center"));
            }
            _ => panic!("Expected an IntentRequest"),
        }
    }

    #[test]
    fn test_launch_request_deserialization() {
        let json = r#"{
            "version": "1.0",
            "session": {"sessionId": "session-1", "new": true},
            "request": {"type": "LaunchRequest", "requestId": "request-1"}
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.session.new);
        assert!(envelope.session.attributes.is_empty());
        assert!(matches!(envelope.request, Request::LaunchRequest { .. }));
    }

    #[test]
    fn test_session_ended_request_deserialization() {
        let json = r#"{
            "version": "1.0",
            "session": {"sessionId": "session-1"},
            "request": {
                "type": "SessionEndedRequest",
                "requestId": "request-9",
                "reason": "USER_INITIATED"
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        match envelope.request {
            Request::SessionEndedRequest { reason, .. } => {
                assert_eq!(reason.as_deref(), Some("USER_INITIATED"));
            }
            _ => panic!("Expected a SessionEndedRequest"),
        }
    }

    #[test]
    fn test_unknown_request_type_is_rejected() {
        let json = r#"{
            "version": "1.0",
            "session": {"sessionId": "session-1"},
            "request": {"type": "AudioPlayerRequest", "requestId": "request-2"}
        }"#;

        assert!(serde_json::from_str::<RequestEnvelope>(json).is_err());
    }

    #[test]
    fn test_slot_value_missing() {
        let intent = Intent {
            name: "GetStation".to_string(),
            slots: HashMap::from([(
                "station".to_string(),
                Slot {
                    name: "station".to_string(),
                    value: None,
                },
            )]),
        };

        assert_eq!(intent.slot_value("station"), None);
        assert_eq!(intent.slot_value("destinationStation"), None);
    }

    #[test]
    fn test_tell_serialization() {
        let envelope = ResponseEnvelope::tell("Hello riders.");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["version"], "1.0");
        assert_eq!(json["response"]["outputSpeech"]["type"], "PlainText");
        assert_eq!(json["response"]["outputSpeech"]["text"], "Hello riders.");
        assert_eq!(json["response"]["shouldEndSession"], true);
        // Empty attribute maps are omitted entirely.
        assert!(json.get("sessionAttributes").is_none());
        assert!(json["response"].get("card").is_none());
        assert!(json["response"].get("reprompt").is_none());
    }

    #[test]
    fn test_tell_with_card_serialization() {
        let envelope = ResponseEnvelope::tell_with_card("Speech.", "Title", "Body.");
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["response"]["card"]["type"], "Simple");
        assert_eq!(json["response"]["card"]["title"], "Title");
        assert_eq!(json["response"]["card"]["content"], "Body.");
        assert_eq!(json["response"]["shouldEndSession"], true);
    }

    #[test]
    fn test_ask_serialization() {
        let mut attributes = Map::new();
        attributes.insert("arrivals".to_string(), serde_json::json!({"glenmont": ["3"]}));

        let envelope = ResponseEnvelope::ask("Going where?", "Please pick a destination.", attributes);
        let json = serde_json::to_value(&envelope).unwrap();

        assert_eq!(json["response"]["shouldEndSession"], false);
        assert_eq!(
            json["response"]["reprompt"]["outputSpeech"]["text"],
            "Please pick a destination."
        );
        assert_eq!(json["sessionAttributes"]["arrivals"]["glenmont"][0], "3");
    }

    #[test]
    fn test_empty_response_has_no_speech() {
        let envelope = ResponseEnvelope::empty();
        let json = serde_json::to_value(&envelope).unwrap();

        assert!(json["response"].get("outputSpeech").is_none());
        assert_eq!(json["response"]["shouldEndSession"], true);
    }
}
