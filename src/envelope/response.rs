//! Outgoing response envelope and the builder handlers use to produce it.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const SPEAK_OPEN: &str = "<speak>";
const SPEAK_CLOSE: &str = "</speak>";

/// Root response envelope.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,

    #[serde(default)]
    pub session_attributes: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,

    pub response: Response,
}

/// Speech, reprompt, and session flag.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    PlainText { text: String },
}

impl OutputSpeech {
    fn ssml(text: &str) -> Self {
        OutputSpeech::Ssml {
            ssml: format!("{SPEAK_OPEN}{}{SPEAK_CLOSE}", strip_speak(text)),
        }
    }

    /// The spoken text without the `<speak>` wrapper.
    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::Ssml { ssml } => strip_speak(ssml),
            OutputSpeech::PlainText { text } => text,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

fn strip_speak(text: &str) -> &str {
    let trimmed = text.trim();
    trimmed
        .strip_prefix(SPEAK_OPEN)
        .and_then(|t| t.strip_suffix(SPEAK_CLOSE))
        .unwrap_or(trimmed)
}

impl ResponseEnvelope {
    /// Main speech, if any.
    pub fn speech_text(&self) -> Option<&str> {
        self.response.output_speech.as_ref().map(OutputSpeech::text)
    }

    /// Reprompt speech, if any.
    pub fn reprompt_text(&self) -> Option<&str> {
        self.response
            .reprompt
            .as_ref()
            .map(|r| r.output_speech.text())
    }

    pub fn should_end_session(&self) -> Option<bool> {
        self.response.should_end_session
    }
}

/// Fluent builder mirroring the platform SDK's response builder.
///
/// Adding a reprompt keeps the session open unless the caller set the flag
/// explicitly.
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    speech: Option<String>,
    reprompt: Option<String>,
    should_end_session: Option<bool>,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn speak(mut self, text: impl Into<String>) -> Self {
        self.speech = Some(text.into());
        self
    }

    pub fn reprompt(mut self, text: impl Into<String>) -> Self {
        self.reprompt = Some(text.into());
        self
    }

    pub fn with_should_end_session(mut self, end: bool) -> Self {
        self.should_end_session = Some(end);
        self
    }

    pub fn get_response(self) -> ResponseEnvelope {
        let should_end_session = self
            .should_end_session
            .or_else(|| self.reprompt.as_ref().map(|_| false));

        ResponseEnvelope {
            version: "1.0".to_string(),
            session_attributes: Map::new(),
            user_agent: None,
            response: Response {
                output_speech: self.speech.as_deref().map(OutputSpeech::ssml),
                reprompt: self.reprompt.as_deref().map(|text| Reprompt {
                    output_speech: OutputSpeech::ssml(text),
                }),
                should_end_session,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reprompt_keeps_session_open() {
        let response = ResponseBuilder::new()
            .speak("Welcome")
            .reprompt("Welcome")
            .get_response();

        assert_eq!(response.speech_text(), Some("Welcome"));
        assert_eq!(response.reprompt_text(), Some("Welcome"));
        assert_eq!(response.should_end_session(), Some(false));
    }

    #[test]
    fn test_explicit_end_session_wins() {
        let response = ResponseBuilder::new()
            .speak("Bye")
            .reprompt("Bye")
            .with_should_end_session(true)
            .get_response();
        assert_eq!(response.should_end_session(), Some(true));
    }

    #[test]
    fn test_empty_response_serialization() {
        let response = ResponseBuilder::new().get_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "version": "1.0", "sessionAttributes": {}, "response": {} })
        );
    }

    #[test]
    fn test_ssml_wire_shape() {
        let response = ResponseBuilder::new().speak("<speak>Hello World!</speak>").get_response();
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(
            json["response"]["outputSpeech"],
            serde_json::json!({ "type": "SSML", "ssml": "<speak>Hello World!</speak>" })
        );
        assert!(json["response"].get("shouldEndSession").is_none());
    }
}
