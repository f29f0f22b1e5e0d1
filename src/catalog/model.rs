// SPDX-License-Identifier: PMPL-1.0-or-later

//! In-memory form of an `.xcstrings` string catalog.
//!
//! Keys and language codes live in `BTreeMap`s so that serializing the same
//! catalog twice yields byte-identical JSON regardless of the order Xcode (or
//! the translation service) produced them in.

use crate::error::{LocalizerError, Result};
use crate::regions::LanguageSet;
use crate::response::TranslationResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_SOURCE_LANGUAGE: &str = "en";
pub const DEFAULT_VERSION: &str = "1.0";

/// Review state Xcode attaches to every string unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    Translated,
    NeedsReview,
    New,
}

/// A single translated string and its review state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LocalizedUnit {
    pub state: UnitState,
    pub value: String,
}

impl LocalizedUnit {
    pub fn translated(value: impl Into<String>) -> Self {
        Self {
            state: UnitState::Translated,
            value: value.into(),
        }
    }
}

/// Wrapper matching the on-disk `{"stringUnit": {...}}` nesting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Localization {
    pub string_unit: LocalizedUnit,
}

impl From<LocalizedUnit> for Localization {
    fn from(string_unit: LocalizedUnit) -> Self {
        Self { string_unit }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_state: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub localizations: BTreeMap<String, Localization>,
    /// Entry fields this crate does not model (`shouldTranslate`, ...),
    /// written back untouched.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl CatalogEntry {
    pub fn unit(&self, language: &str) -> Option<&LocalizedUnit> {
        self.localizations
            .get(language)
            .map(|localization| &localization.string_unit)
    }

    pub fn set_unit(&mut self, language: impl Into<String>, unit: LocalizedUnit) {
        self.localizations.insert(language.into(), unit.into());
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.localizations.keys().map(String::as_str)
    }

    /// True when every language in `languages` has a localization here.
    pub fn covers(&self, languages: &LanguageSet) -> bool {
        languages
            .iter()
            .all(|language| self.localizations.contains_key(language))
    }
}

/// Root of an `.xcstrings` document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    #[serde(default = "default_source_language")]
    pub source_language: String,
    #[serde(rename = "strings")]
    pub entries: BTreeMap<String, CatalogEntry>,
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_source_language() -> String {
    DEFAULT_SOURCE_LANGUAGE.to_string()
}

fn default_version() -> String {
    DEFAULT_VERSION.to_string()
}

impl Default for Catalog {
    fn default() -> Self {
        Self {
            source_language: default_source_language(),
            entries: BTreeMap::new(),
            version: default_version(),
        }
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse catalog JSON. Unknown `state` values and missing `strings` are
    /// rejected rather than defaulted.
    pub fn parse(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|err| LocalizerError::format("string catalog", err))
    }

    /// Pretty JSON (two-space indent, trailing newline) with sorted keys.
    pub fn serialize(&self) -> Result<String> {
        let mut text = serde_json::to_string_pretty(self)
            .map_err(|err| LocalizerError::format("string catalog", err))?;
        text.push('\n');
        Ok(text)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn entry(&self, key: &str) -> Option<&CatalogEntry> {
        self.entries.get(key)
    }

    pub fn insert(&mut self, key: impl Into<String>, entry: CatalogEntry) -> Option<CatalogEntry> {
        self.entries.insert(key.into(), entry)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keys that still need a translation.
    ///
    /// With configured languages, a key is incomplete when any of them lacks
    /// a localization. Without any (no `knownRegions` block was found), only
    /// keys with no localizations at all are reported.
    pub fn incomplete_keys(&self, languages: &LanguageSet) -> BTreeSet<String> {
        self.entries
            .iter()
            .filter(|(_, entry)| {
                if languages.is_empty() {
                    entry.localizations.is_empty()
                } else {
                    !entry.covers(languages)
                }
            })
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Build a catalog from service output: one `translated` unit per
    /// configured language, with an empty value where the service skipped a
    /// language. Later response entries for the same key win.
    ///
    /// With no configured languages the entries carry no localizations, so
    /// whatever the service returned is dropped.
    ///
    /// The entries are fresh: merged over an existing catalog they replace
    /// the old entry whole, so a translated key loses its `comment`,
    /// `extractionState` and any other entry metadata.
    pub fn from_translation_response(response: &TranslationResponse, languages: &LanguageSet) -> Self {
        let mut catalog = Self::new();
        for response_entry in &response.entries {
            let mut entry = CatalogEntry::default();
            for language in languages {
                let value = response_entry.localizations.get(language).unwrap_or_default();
                entry.set_unit(language.as_str(), LocalizedUnit::translated(value));
            }
            catalog.insert(response_entry.key.as_str(), entry);
        }
        catalog
    }
}
