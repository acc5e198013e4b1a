//! Incoming request envelope.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Request type discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequestType {
    LaunchRequest,
    IntentRequest,
    SessionEndedRequest,
    /// Any type this skill has no handler for (e.g. `CanFulfillIntentRequest`).
    Unknown,
}

impl RequestType {
    pub fn parse(raw: &str) -> Self {
        match raw {
            "LaunchRequest" => RequestType::LaunchRequest,
            "IntentRequest" => RequestType::IntentRequest,
            "SessionEndedRequest" => RequestType::SessionEndedRequest,
            _ => RequestType::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RequestType::LaunchRequest => "LaunchRequest",
            RequestType::IntentRequest => "IntentRequest",
            RequestType::SessionEndedRequest => "SessionEndedRequest",
            RequestType::Unknown => "Unknown",
        }
    }
}

/// Root request envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    /// Device and system context; carried through untouched.
    #[serde(default, skip_serializing_if = "Value::is_null")]
    pub context: Value,

    pub request: Request,
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Session metadata.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    #[serde(default)]
    pub session_id: String,

    #[serde(rename = "new", default)]
    pub is_new: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub attributes: Map<String, Value>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

/// The request body proper.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Request {
    /// Raw request type string, see [`Request::request_type`].
    #[serde(rename = "type")]
    pub kind: String,

    #[serde(default)]
    pub request_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,

    /// Locale tag such as `en-US`. Empty when the platform omits it.
    #[serde(default)]
    pub locale: String,

    /// Present only for `IntentRequest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,

    /// Why the session ended (`SessionEndedRequest` only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl Request {
    pub fn request_type(&self) -> RequestType {
        RequestType::parse(&self.kind)
    }
}

/// A pre-classified intent.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,

    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub slots: Map<String, Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<String>,
}

impl RequestEnvelope {
    /// Build a `LaunchRequest` for the given locale.
    pub fn launch(locale: &str) -> Self {
        Self::with_request(Request::new("LaunchRequest", locale))
    }

    /// Build an `IntentRequest` for `intent_name`.
    pub fn intent(intent_name: &str, locale: &str) -> Self {
        let mut request = Request::new("IntentRequest", locale);
        request.intent = Some(Intent {
            name: intent_name.to_string(),
            slots: Map::new(),
            confirmation_status: Some("NONE".to_string()),
        });
        Self::with_request(request)
    }

    /// Build a `SessionEndedRequest` with the given reason.
    pub fn session_ended(locale: &str, reason: &str) -> Self {
        let mut request = Request::new("SessionEndedRequest", locale);
        request.reason = Some(reason.to_string());
        Self::with_request(request)
    }

    fn with_request(request: Request) -> Self {
        Self {
            version: default_version(),
            session: Some(Session {
                session_id: format!("amzn1.echo-api.session.{}", Uuid::new_v4()),
                is_new: true,
                ..Session::default()
            }),
            context: Value::Null,
            request,
        }
    }

    pub fn request_type(&self) -> RequestType {
        self.request.request_type()
    }

    /// Intent name as sent by the platform, if this is an intent request.
    pub fn intent_name(&self) -> Option<&str> {
        self.request.intent.as_ref().map(|i| i.name.as_str())
    }

    pub fn locale(&self) -> &str {
        &self.request.locale
    }
}

impl Request {
    fn new(kind: &str, locale: &str) -> Self {
        Self {
            kind: kind.to_string(),
            request_id: format!("amzn1.echo-api.request.{}", Uuid::new_v4()),
            timestamp: None,
            locale: locale.to_string(),
            intent: None,
            reason: None,
            error: None,
        }
    }
}
