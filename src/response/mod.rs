// SPDX-License-Identifier: PMPL-1.0-or-later

//! Structured output returned by the translation service.
//!
//! The payload is a JSON array of `{key, localizations}` records where
//! `localizations` is a list of `{language_code, value}` pairs. The list is
//! modelled as a small ordered map: a repeated language code replaces the
//! earlier value in place instead of producing a second pair, so lookups
//! always see the last value the service sent for that language.

use crate::error::{LocalizerError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{json, Value};

/// One `{language_code, value}` pair as it appears on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseLocalization {
    pub language_code: String,
    pub value: String,
}

/// Ordered language → value pairs with insert-or-replace semantics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseLocalizations {
    items: Vec<ResponseLocalization>,
}

impl ResponseLocalizations {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value for `language_code`, or `None` if the service omitted it.
    pub fn get(&self, language_code: &str) -> Option<&str> {
        self.items
            .iter()
            .find(|item| item.language_code == language_code)
            .map(|item| item.value.as_str())
    }

    /// Insert a pair, or overwrite the value of an existing one without
    /// moving it. Other pairs keep their first-seen order.
    pub fn upsert(&mut self, language_code: impl Into<String>, value: impl Into<String>) {
        let language_code = language_code.into();
        let value = value.into();
        match self
            .items
            .iter_mut()
            .find(|item| item.language_code == language_code)
        {
            Some(existing) => existing.value = value,
            None => self.items.push(ResponseLocalization {
                language_code,
                value,
            }),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.items
            .iter()
            .map(|item| (item.language_code.as_str(), item.value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ResponseLocalizations {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut localizations = Self::new();
        for (code, value) in iter {
            localizations.upsert(code, value);
        }
        localizations
    }
}

impl Serialize for ResponseLocalizations {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.items.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ResponseLocalizations {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = Vec::<ResponseLocalization>::deserialize(deserializer)?;
        Ok(raw
            .into_iter()
            .map(|item| (item.language_code, item.value))
            .collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ResponseEntry {
    pub key: String,
    pub localizations: ResponseLocalizations,
}

/// Parsed service output, in the order the service returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationResponse {
    pub entries: Vec<ResponseEntry>,
}

impl TranslationResponse {
    /// Strictly parse the service's JSON payload.
    pub fn parse(payload: &str) -> Result<Self> {
        serde_json::from_str(payload).map_err(|err| LocalizerError::format("translation response", err))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Response schema sent with the request so the service's structured output
/// matches [`TranslationResponse`] field for field.
pub fn response_schema() -> Value {
    json!({
        "type": "ARRAY",
        "items": {
            "type": "OBJECT",
            "properties": {
                "key": { "type": "STRING" },
                "localizations": {
                    "type": "ARRAY",
                    "items": {
                        "type": "OBJECT",
                        "properties": {
                            "language_code": { "type": "STRING" },
                            "value": { "type": "STRING" }
                        },
                        "required": ["language_code", "value"],
                        "propertyOrdering": ["language_code", "value"]
                    }
                }
            },
            "required": ["key", "localizations"],
            "propertyOrdering": ["key", "localizations"]
        }
    })
}
