//! Request matching logic.
//!
//! # Responsibilities
//! - Match the request type
//! - Match canonical intent names (implies `IntentRequest`)
//!
//! # Design Decisions
//! - Intent names are compared after canonicalization, so the platform form
//!   (`AMAZON.HelpIntent`) and the short form (`Help`) are equivalent
//! - Intent comparison is case-sensitive, as the platform's names are
//! - Matchers are pure functions of the envelope

use crate::envelope::{RequestEnvelope, RequestType};

const PLATFORM_PREFIX: &str = "AMAZON.";
const INTENT_SUFFIX: &str = "Intent";

/// Trait for matching requests against conditions.
pub trait Matcher: Send + Sync + std::fmt::Debug {
    /// Returns true if the request matches this condition.
    fn matches(&self, envelope: &RequestEnvelope) -> bool;
}

/// Strip the platform prefix and the `Intent` suffix from an intent name.
///
/// `AMAZON.HelpIntent` → `Help`, `GetFactIntent` → `GetFact`, `Help` → `Help`.
pub fn canonical_intent_name(raw: &str) -> &str {
    let name = raw.strip_prefix(PLATFORM_PREFIX).unwrap_or(raw);
    match name.strip_suffix(INTENT_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => name,
    }
}

/// Matches a request type.
#[derive(Debug, Clone, Copy)]
pub struct RequestTypeMatcher {
    expected: RequestType,
}

impl RequestTypeMatcher {
    pub fn new(expected: RequestType) -> Self {
        Self { expected }
    }
}

impl Matcher for RequestTypeMatcher {
    fn matches(&self, envelope: &RequestEnvelope) -> bool {
        envelope.request_type() == self.expected
    }
}

/// Matches an `IntentRequest` whose canonical intent name is in the set.
#[derive(Debug, Clone)]
pub struct IntentMatcher {
    names: Vec<String>,
}

impl IntentMatcher {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            names: names
                .into_iter()
                .map(|n| canonical_intent_name(n.as_ref()).to_string())
                .collect(),
        }
    }
}

impl Matcher for IntentMatcher {
    fn matches(&self, envelope: &RequestEnvelope) -> bool {
        if envelope.request_type() != RequestType::IntentRequest {
            return false;
        }
        envelope
            .intent_name()
            .map(canonical_intent_name)
            .map(|name| self.names.iter().any(|n| n == name))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_intent_name() {
        assert_eq!(canonical_intent_name("AMAZON.HelpIntent"), "Help");
        assert_eq!(canonical_intent_name("AMAZON.FallbackIntent"), "Fallback");
        assert_eq!(canonical_intent_name("HelloWorldIntent"), "HelloWorld");
        assert_eq!(canonical_intent_name("GetFact"), "GetFact");
        assert_eq!(canonical_intent_name("Intent"), "Intent");
        assert_eq!(canonical_intent_name("AMAZON.Intent"), "Intent");
    }

    #[test]
    fn test_request_type_matcher() {
        let matcher = RequestTypeMatcher::new(RequestType::LaunchRequest);
        assert!(matcher.matches(&RequestEnvelope::launch("en-US")));
        assert!(!matcher.matches(&RequestEnvelope::intent("Help", "en-US")));
    }

    #[test]
    fn test_intent_matcher() {
        let matcher = IntentMatcher::new(["Cancel", "Stop"]);
        assert!(matcher.matches(&RequestEnvelope::intent("AMAZON.StopIntent", "en-US")));
        assert!(matcher.matches(&RequestEnvelope::intent("Cancel", "en-US")));
        assert!(!matcher.matches(&RequestEnvelope::intent("Help", "en-US")));
        assert!(!matcher.matches(&RequestEnvelope::launch("en-US")));
    }

    #[test]
    fn test_intent_matcher_requires_intent_request() {
        let mut envelope = RequestEnvelope::intent("Stop", "en-US");
        envelope.request.kind = "SessionEndedRequest".into();
        assert!(!IntentMatcher::new(["Stop"]).matches(&envelope));
    }
}
