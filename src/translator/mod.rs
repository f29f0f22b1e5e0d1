// SPDX-License-Identifier: PMPL-1.0-or-later

//! The translation service seam.
//!
//! The pipeline only needs "given keys and languages, return translations",
//! so that is the whole trait. [`GeminiTranslator`] is the production
//! implementation; tests substitute their own.

mod gemini;

pub use gemini::GeminiTranslator;

use crate::error::Result;
use crate::regions::LanguageSet;
use crate::response::TranslationResponse;
use std::collections::BTreeSet;

pub const SYSTEM_INSTRUCTION: &str = "You are a localization expert. Translate the provided localization keys into each language specified by the corresponding key.";

pub trait Translator {
    fn translate(&self, keys: &BTreeSet<String>, languages: &LanguageSet) -> Result<TranslationResponse>;
}

impl<T: Translator + ?Sized> Translator for &T {
    fn translate(&self, keys: &BTreeSet<String>, languages: &LanguageSet) -> Result<TranslationResponse> {
        (**self).translate(keys, languages)
    }
}

/// The user turn of the request: the keys to translate and the target codes.
pub fn user_prompt(keys: &BTreeSet<String>, languages: &LanguageSet) -> String {
    format!(
        "Localization keys: {}\nLanguage keys: {}",
        join(keys),
        join(languages)
    )
}

fn join(items: &BTreeSet<String>) -> String {
    items
        .iter()
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
