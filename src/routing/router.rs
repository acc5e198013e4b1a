//! Handler lookup and dispatch.
//!
//! # Responsibilities
//! - Store the ordered handler table
//! - Find the first entry whose matcher accepts the request
//! - Invoke exactly that handler
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(n) ordered scan; order is the only disambiguation between overlapping
//!   matchers
//! - Explicit NoHandlerMatched rather than a silent default

use crate::config::SkillSettings;
use crate::envelope::{RequestEnvelope, ResponseEnvelope};
use crate::error::{Result, SkillError};
use crate::facts::RandomSource;
use crate::localization::Localizer;
use crate::observability::metrics;
use crate::routing::matcher::Matcher;

/// Everything a handler may read while answering one request.
#[derive(Debug, Clone, Copy)]
pub struct HandlerInput<'a> {
    pub envelope: &'a RequestEnvelope,
    pub localizer: &'a Localizer,
    pub rng: &'a dyn RandomSource,
    pub settings: &'a SkillSettings,
}

/// Produces the response for a matched request.
pub trait RequestHandler: Send + Sync {
    fn handle(&self, input: &HandlerInput<'_>) -> Result<ResponseEnvelope>;
}

impl<F> RequestHandler for F
where
    F: Fn(&HandlerInput<'_>) -> Result<ResponseEnvelope> + Send + Sync,
{
    fn handle(&self, input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
        self(input)
    }
}

struct HandlerEntry {
    name: &'static str,
    matcher: Box<dyn Matcher>,
    handler: Box<dyn RequestHandler>,
}

impl std::fmt::Debug for HandlerEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerEntry")
            .field("name", &self.name)
            .field("matcher", &self.matcher)
            .finish()
    }
}

/// Ordered handler table. First match wins.
#[derive(Debug)]
pub struct HandlerRegistry {
    entries: Vec<HandlerEntry>,
}

/// Accumulates entries in order; [`build`](Self::build) freezes them.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    entries: Vec<HandlerEntry>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry after all previously added ones.
    pub fn route(
        mut self,
        name: &'static str,
        matcher: impl Matcher + 'static,
        handler: impl RequestHandler + 'static,
    ) -> Self {
        self.entries.push(HandlerEntry {
            name,
            matcher: Box::new(matcher),
            handler: Box::new(handler),
        });
        self
    }

    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            entries: self.entries,
        }
    }
}

impl HandlerRegistry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Name of the entry that would handle `envelope`.
    pub fn match_request(&self, envelope: &RequestEnvelope) -> Option<&'static str> {
        self.find(envelope).map(|entry| entry.name)
    }

    /// True when some entry accepts `envelope`.
    pub fn covers(&self, envelope: &RequestEnvelope) -> bool {
        self.find(envelope).is_some()
    }

    /// Entry names in scan order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|e| e.name).collect()
    }

    /// Run the first matching handler.
    pub fn dispatch(&self, input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
        let envelope = input.envelope;
        let entry = self.find(envelope).ok_or_else(|| SkillError::NoHandlerMatched {
            request_type: envelope.request.kind.clone(),
            intent: envelope.intent_name().map(str::to_string),
        })?;

        tracing::debug!(
            handler = entry.name,
            request_id = %envelope.request.request_id,
            "Handler matched"
        );
        metrics::record_handler(entry.name);

        entry.handler.handle(input)
    }

    fn find(&self, envelope: &RequestEnvelope) -> Option<&HandlerEntry> {
        self.entries.iter().find(|e| e.matcher.matches(envelope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{RequestType, ResponseBuilder};
    use crate::error::ErrorKind;
    use crate::facts::FixedIndex;
    use crate::localization::{LocaleTable, TranslationBundle};
    use crate::routing::matcher::{IntentMatcher, RequestTypeMatcher};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn localizer() -> Localizer {
        LocaleTable::builder("en")
            .bundle("en", TranslationBundle::new())
            .build()
            .unwrap()
            .resolve("en-US")
    }

    struct Counting {
        counter: Arc<AtomicUsize>,
        speech: &'static str,
    }

    impl RequestHandler for Counting {
        fn handle(&self, _input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
            self.counter.fetch_add(1, Ordering::SeqCst);
            Ok(ResponseBuilder::new().speak(self.speech).get_response())
        }
    }

    fn counting(counter: Arc<AtomicUsize>, speech: &'static str) -> Counting {
        Counting { counter, speech }
    }

    fn empty(_input: &HandlerInput<'_>) -> Result<ResponseEnvelope> {
        Ok(ResponseBuilder::new().get_response())
    }

    fn run(registry: &HandlerRegistry, envelope: &RequestEnvelope) -> Result<ResponseEnvelope> {
        let localizer = localizer();
        let settings = SkillSettings::default();
        registry.dispatch(&HandlerInput {
            envelope,
            localizer: &localizer,
            rng: &FixedIndex(0),
            settings: &settings,
        })
    }

    #[test]
    fn test_first_match_wins_exactly_once() {
        let counters: Vec<Arc<AtomicUsize>> =
            (0..4).map(|_| Arc::new(AtomicUsize::new(0))).collect();
        // Entries 1..3 all accept a "Help" intent; only the first may run.
        let registry = HandlerRegistry::builder()
            .route(
                "launch",
                RequestTypeMatcher::new(RequestType::LaunchRequest),
                counting(counters[0].clone(), "launch"),
            )
            .route("help", IntentMatcher::new(["Help"]), counting(counters[1].clone(), "help"))
            .route(
                "help-again",
                IntentMatcher::new(["AMAZON.HelpIntent"]),
                counting(counters[2].clone(), "help-again"),
            )
            .route(
                "any-intent",
                RequestTypeMatcher::new(RequestType::IntentRequest),
                counting(counters[3].clone(), "any"),
            )
            .build();

        let response =
            run(&registry, &RequestEnvelope::intent("AMAZON.HelpIntent", "en-US")).unwrap();
        assert_eq!(response.speech_text(), Some("help"));

        let counts: Vec<usize> = counters.iter().map(|c| c.load(Ordering::SeqCst)).collect();
        assert_eq!(counts, vec![0, 1, 0, 0]);
    }

    #[test]
    fn test_every_request_runs_one_handler() {
        let counter = Arc::new(AtomicUsize::new(0));
        let registry = HandlerRegistry::builder()
            .route(
                "launch",
                RequestTypeMatcher::new(RequestType::LaunchRequest),
                counting(counter.clone(), "l"),
            )
            .route(
                "ended",
                RequestTypeMatcher::new(RequestType::SessionEndedRequest),
                counting(counter.clone(), "e"),
            )
            .route("stop", IntentMatcher::new(["Stop"]), counting(counter.clone(), "s"))
            .route(
                "any-intent",
                RequestTypeMatcher::new(RequestType::IntentRequest),
                counting(counter.clone(), "i"),
            )
            .build();

        let envelopes = [
            RequestEnvelope::launch("en-US"),
            RequestEnvelope::session_ended("en-US", "USER_INITIATED"),
            RequestEnvelope::intent("Stop", "en-US"),
            RequestEnvelope::intent("Whatever", "en-US"),
        ];
        for (i, envelope) in envelopes.iter().enumerate() {
            run(&registry, envelope).unwrap();
            assert_eq!(counter.load(Ordering::SeqCst), i + 1);
        }
    }

    #[test]
    fn test_no_handler_matched() {
        let registry = HandlerRegistry::builder()
            .route("launch", RequestTypeMatcher::new(RequestType::LaunchRequest), empty)
            .build();

        let envelope = RequestEnvelope::intent("Help", "en-US");
        assert!(!registry.covers(&envelope));
        let err = run(&registry, &envelope).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NoHandlerMatched);
        assert!(matches!(
            err,
            SkillError::NoHandlerMatched { ref request_type, intent: Some(ref intent) }
                if request_type == "IntentRequest" && intent == "Help"
        ));
    }

    #[test]
    fn test_names_preserve_order() {
        let registry = HandlerRegistry::builder()
            .route("b", RequestTypeMatcher::new(RequestType::LaunchRequest), empty)
            .route("a", RequestTypeMatcher::new(RequestType::LaunchRequest), empty)
            .build();
        assert_eq!(registry.names(), vec!["b", "a"]);
        assert_eq!(registry.match_request(&RequestEnvelope::launch("en")), Some("b"));
    }
}
