//! Locale table and resolution.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

use crate::error::{Result, SkillError};
use crate::localization::bundle::{Translation, TranslationBundle};

/// Catalog compiled into the binary.
const BUILTIN_CATALOG: &str = include_str!("../../resources/strings.toml");

/// Error building a [`LocaleTable`].
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("failed to read string catalog {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse string catalog: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("fallback language `{0}` has no bundle")]
    MissingFallback(String),
}

/// Base-language code → bundle, with one designated fallback.
///
/// Built once at startup and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct LocaleTable {
    bundles: HashMap<String, Arc<TranslationBundle>>,
    fallback_language: String,
}

/// Collects bundles and checks the fallback on [`build`](Self::build).
#[derive(Debug)]
pub struct LocaleTableBuilder {
    bundles: HashMap<String, Arc<TranslationBundle>>,
    fallback_language: String,
}

impl LocaleTableBuilder {
    pub fn bundle(mut self, language: &str, bundle: TranslationBundle) -> Self {
        self.bundles.insert(language.to_lowercase(), Arc::new(bundle));
        self
    }

    pub fn build(self) -> std::result::Result<LocaleTable, CatalogError> {
        if !self.bundles.contains_key(&self.fallback_language) {
            return Err(CatalogError::MissingFallback(self.fallback_language));
        }
        Ok(LocaleTable {
            bundles: self.bundles,
            fallback_language: self.fallback_language,
        })
    }
}

impl LocaleTable {
    pub fn builder(fallback_language: &str) -> LocaleTableBuilder {
        LocaleTableBuilder {
            bundles: HashMap::new(),
            fallback_language: fallback_language.to_lowercase(),
        }
    }

    /// Parse a TOML catalog with one table per language.
    pub fn from_toml_str(
        catalog: &str,
        fallback_language: &str,
    ) -> std::result::Result<Self, CatalogError> {
        let parsed: HashMap<String, TranslationBundle> = toml::from_str(catalog)?;
        parsed
            .into_iter()
            .fold(Self::builder(fallback_language), |builder, (language, bundle)| {
                builder.bundle(&language, bundle)
            })
            .build()
    }

    /// The catalog shipped with the binary.
    pub fn builtin(fallback_language: &str) -> std::result::Result<Self, CatalogError> {
        Self::from_toml_str(BUILTIN_CATALOG, fallback_language)
    }

    /// Load a catalog from disk.
    pub fn load(path: &Path, fallback_language: &str) -> std::result::Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, fallback_language)
    }

    pub fn fallback_language(&self) -> &str {
        &self.fallback_language
    }

    /// Supported base languages, sorted.
    pub fn languages(&self) -> Vec<&str> {
        let mut languages: Vec<&str> = self.bundles.keys().map(String::as_str).collect();
        languages.sort_unstable();
        languages
    }

    /// Pick the bundle for `locale`, falling back when its base language is
    /// not in the table.
    pub fn resolve(&self, locale: &str) -> Localizer {
        let base = base_language(locale);
        let fallback = self.fallback_bundle();

        match self.bundles.get(&base) {
            Some(bundle) => Localizer {
                language: base,
                primary: Arc::clone(bundle),
                fallback,
            },
            None => Localizer {
                language: self.fallback_language.clone(),
                primary: Arc::clone(&fallback),
                fallback,
            },
        }
    }

    fn fallback_bundle(&self) -> Arc<TranslationBundle> {
        // Presence is checked by LocaleTableBuilder::build.
        self.bundles
            .get(&self.fallback_language)
            .cloned()
            .unwrap_or_default()
    }
}

/// Convenience form of [`LocaleTable::resolve`].
pub fn resolve(locale: &str, table: &LocaleTable) -> Localizer {
    table.resolve(locale)
}

/// Base-language code of a locale tag: `"en-US"` → `"en"`, `"es_MX"` → `"es"`.
pub fn base_language(locale: &str) -> String {
    locale
        .trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// The bundle resolved for one request, plus the fallback bundle used for
/// keys it lacks.
#[derive(Debug, Clone)]
pub struct Localizer {
    language: String,
    primary: Arc<TranslationBundle>,
    fallback: Arc<TranslationBundle>,
}

impl Localizer {
    /// Base language of the resolved bundle.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Look up `key` and substitute `%s` markers with `args`.
    pub fn translate(&self, key: &str, args: &[&str]) -> Result<Translation> {
        self.primary
            .get(key)
            .or_else(|| self.fallback.get(key))
            .map(|value| value.render(args))
            .ok_or_else(|| SkillError::MissingKey {
                key: key.to_string(),
                language: self.language.clone(),
            })
    }

    /// Like [`translate`](Self::translate) but requires a template value.
    pub fn text(&self, key: &str, args: &[&str]) -> Result<String> {
        match self.translate(key, args)? {
            Translation::Text(text) => Ok(text),
            Translation::List(_) => Err(SkillError::UnexpectedValue {
                key: key.to_string(),
                expected: "string",
            }),
        }
    }

    /// Like [`translate`](Self::translate) but requires a list value.
    pub fn list(&self, key: &str) -> Result<Vec<String>> {
        match self.translate(key, &[])? {
            Translation::List(items) => Ok(items),
            Translation::Text(_) => Err(SkillError::UnexpectedValue {
                key: key.to_string(),
                expected: "list",
            }),
        }
    }
}
