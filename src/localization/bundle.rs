//! Translation bundles and template substitution.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Marker replaced positionally by [`fill_template`].
pub const PLACEHOLDER: &str = "%s";

/// A single catalog value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum BundleValue {
    /// Template string, may contain `%s` markers.
    Template(String),
    /// Ordered list of strings (e.g. the fact list).
    List(Vec<String>),
}

/// Result of a successful translation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Text(String),
    List(Vec<String>),
}

/// Strings for one base language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct TranslationBundle {
    entries: HashMap<String, BundleValue>,
}

impl TranslationBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: BundleValue) {
        self.entries.insert(key.into(), value);
    }

    /// Builder-style insert of a template string.
    pub fn with_text(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(key, BundleValue::Template(text.into()));
        self
    }

    /// Builder-style insert of a string list.
    pub fn with_list<I, S>(mut self, key: impl Into<String>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.insert(key, BundleValue::List(items.into_iter().map(Into::into).collect()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&BundleValue> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl BundleValue {
    /// Render this value; lists ignore `args`.
    pub fn render(&self, args: &[&str]) -> Translation {
        match self {
            BundleValue::Template(template) => Translation::Text(fill_template(template, args)),
            BundleValue::List(items) => Translation::List(items.clone()),
        }
    }
}

/// Replace `%s` markers left to right with `args`.
///
/// Markers without a matching argument are kept literally; surplus arguments
/// are ignored.
pub fn fill_template(template: &str, args: &[&str]) -> String {
    let mut pieces = template.split(PLACEHOLDER);
    let mut out = String::with_capacity(template.len());
    if let Some(first) = pieces.next() {
        out.push_str(first);
    }

    let mut args = args.iter();
    for piece in pieces {
        match args.next() {
            Some(arg) => out.push_str(arg),
            None => out.push_str(PLACEHOLDER),
        }
        out.push_str(piece);
    }
    out
}
