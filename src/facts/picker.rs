//! Picks one fact from the resolved bundle and composes the fact speech.

use crate::error::{Result, SkillError};
use crate::facts::random::RandomSource;
use crate::localization::{keys, Localizer};

/// Select one fact uniformly at random.
///
/// An index past the end (only possible with a stub source) is clamped to
/// the last fact.
pub fn pick_fact(localizer: &Localizer, rng: &dyn RandomSource) -> Result<String> {
    let mut facts = localizer.list(keys::FACTS)?;
    if facts.is_empty() {
        return Err(SkillError::EmptyFactList {
            key: keys::FACTS.to_string(),
        });
    }

    let index = rng.index(facts.len()).min(facts.len() - 1);
    tracing::debug!(language = localizer.language(), index, "Fact selected");
    Ok(facts.swap_remove(index))
}

/// `GET_FRASES_MSG` + fact + `GET_FRASES_MSG2`.
pub fn fact_speech(localizer: &Localizer, rng: &dyn RandomSource) -> Result<String> {
    let fact = pick_fact(localizer, rng)?;
    let prefix = localizer.text(keys::FACT_PREFIX, &[])?;
    let suffix = localizer.text(keys::FACT_SUFFIX, &[])?;
    Ok(format!("{prefix}{fact}{suffix}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::random::{FixedIndex, ThreadRandom};
    use crate::localization::{LocaleTable, TranslationBundle};

    fn table_with_facts(facts: &[&str]) -> LocaleTable {
        LocaleTable::builder("en")
            .bundle(
                "en",
                TranslationBundle::new()
                    .with_text(keys::FACT_PREFIX, "[")
                    .with_text(keys::FACT_SUFFIX, "]")
                    .with_list(keys::FACTS, facts.iter().copied()),
            )
            .build()
            .unwrap()
    }

    #[test]
    fn test_pick_boundaries() {
        let localizer = table_with_facts(&["first", "middle", "last"]).resolve("en");
        assert_eq!(pick_fact(&localizer, &FixedIndex(0)).unwrap(), "first");
        assert_eq!(pick_fact(&localizer, &FixedIndex(1)).unwrap(), "middle");
        assert_eq!(pick_fact(&localizer, &FixedIndex(2)).unwrap(), "last");
    }

    #[test]
    fn test_out_of_range_stub_is_clamped() {
        let localizer = table_with_facts(&["a", "b"]).resolve("en");
        assert_eq!(pick_fact(&localizer, &FixedIndex(99)).unwrap(), "b");
    }

    #[test]
    fn test_empty_fact_list() {
        let localizer = table_with_facts(&[]).resolve("en");
        assert!(matches!(
            pick_fact(&localizer, &ThreadRandom),
            Err(SkillError::EmptyFactList { .. })
        ));
    }

    #[test]
    fn test_fact_speech_composition() {
        let localizer = table_with_facts(&["x", "y"]).resolve("en");
        assert_eq!(fact_speech(&localizer, &FixedIndex(1)).unwrap(), "[y]");
    }

    #[test]
    fn test_builtin_fact_speech_every_index() {
        let table = LocaleTable::builtin("en").unwrap();
        let localizer = table.resolve("en-US");
        let facts = localizer.list(keys::FACTS).unwrap();
        for (i, fact) in facts.iter().enumerate() {
            let speech = fact_speech(&localizer, &FixedIndex(i)).unwrap();
            assert_eq!(
                speech,
                format!(
                    "A curious fact is ...{fact}..., you can ask for another fun fact ... or tell me a fun fact about Messi ... or, if you want to stop me just say, Cancel! ... so how can I help you?"
                )
            );
        }
    }
}
