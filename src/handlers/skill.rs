//! The skill's request handlers.

use crate::envelope::{RequestType, ResponseBuilder, ResponseEnvelope};
use crate::error::Result;
use crate::facts;
use crate::localization::keys;
use crate::routing::{HandlerInput, HandlerRegistry, IntentMatcher, RequestTypeMatcher};

pub const HELLO_WORLD_SPEECH: &str = "Hello World!";
pub const HELP_SPEECH: &str = "You can say hello to me! How can I help?";
pub const GOODBYE_SPEECH: &str = "Goodbye!";
pub const FALLBACK_SPEECH: &str = "Sorry, I don't know about that. Please try again.";

/// Spoken by the error boundary regardless of locale or failure point.
pub const ERROR_SPEECH: &str = "Sorry, I had trouble doing what you asked. Please try again.";

/// Build the registry in handler-table order.
pub fn skill_registry() -> HandlerRegistry {
    HandlerRegistry::builder()
        .route("launch", RequestTypeMatcher::new(RequestType::LaunchRequest), launch)
        .route("get_fact", IntentMatcher::new(["GetFact", "Frases"]), get_fact)
        .route("hello_world", IntentMatcher::new(["HelloWorld"]), hello_world)
        .route("help", IntentMatcher::new(["Help"]), help)
        .route("cancel_and_stop", IntentMatcher::new(["Cancel", "Stop"]), cancel_and_stop)
        .route("fallback", IntentMatcher::new(["Fallback"]), fallback)
        .route(
            "session_ended",
            RequestTypeMatcher::new(RequestType::SessionEndedRequest),
            session_ended,
        )
        .route(
            "intent_reflector",
            RequestTypeMatcher::new(RequestType::IntentRequest),
            intent_reflector,
        )
        .build()
}

fn launch(input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
    let speech = input.localizer.text(keys::WELCOME_MESSAGE, &[])?;
    Ok(ResponseBuilder::new()
        .speak(speech.as_str())
        .reprompt(speech)
        .get_response())
}

fn get_fact(input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
    let speech = facts::fact_speech(input.localizer, input.rng)?;
    Ok(ResponseBuilder::new()
        .speak(speech)
        .reprompt(input.settings.fact_reprompt.as_str())
        .get_response())
}

fn hello_world(_input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
    Ok(ResponseBuilder::new().speak(HELLO_WORLD_SPEECH).get_response())
}

// Help, goodbye and fallback speech is English in every locale.
fn help(_input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
    Ok(ResponseBuilder::new()
        .speak(HELP_SPEECH)
        .reprompt(HELP_SPEECH)
        .get_response())
}

fn cancel_and_stop(_input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
    Ok(ResponseBuilder::new()
        .speak(GOODBYE_SPEECH)
        .with_should_end_session(true)
        .get_response())
}

fn fallback(_input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
    Ok(ResponseBuilder::new()
        .speak(FALLBACK_SPEECH)
        .reprompt(FALLBACK_SPEECH)
        .get_response())
}

fn session_ended(input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
    let request = &input.envelope.request;
    tracing::info!(
        request_id = %request.request_id,
        reason = request.reason.as_deref().unwrap_or("unknown"),
        error = ?request.error,
        "Session ended"
    );
    Ok(ResponseBuilder::new().get_response())
}

fn intent_reflector(input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
    let intent_name = input.envelope.intent_name().unwrap_or_default();
    let speech = input.localizer.text(keys::REFLECTOR_MESSAGE, &[intent_name])?;
    Ok(ResponseBuilder::new().speak(speech).get_response())
}

/// Fixed apology produced by the error boundary.
pub fn error_response() -> ResponseEnvelope {
    ResponseBuilder::new()
        .speak(ERROR_SPEECH)
        .reprompt(ERROR_SPEECH)
        .get_response()
}
