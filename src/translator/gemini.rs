// SPDX-License-Identifier: PMPL-1.0-or-later

//! Gemini `generateContent` client with structured JSON output.

use super::{user_prompt, Translator, SYSTEM_INSTRUCTION};
use crate::config::LocalizerConfig;
use crate::error::{LocalizerError, Result};
use crate::regions::LanguageSet;
use crate::response::{response_schema, TranslationResponse};
use reqwest::blocking::Client;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use std::time::Duration;
use tracing::{debug, info};

const API_KEY_HEADER: &str = "x-goog-api-key";
const MAX_ERROR_BODY: usize = 512;

pub struct GeminiTranslator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiTranslator {
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("xcstrings-localizer/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|err| LocalizerError::ExternalService(format!("http client build failed: {err}")))?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Requires an API key; the model and endpoint always have defaults.
    pub fn from_config(config: &LocalizerConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        Self::new(&config.endpoint, &config.model, api_key, config.timeout)
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }

    fn request_body(prompt: &str) -> Value {
        json!({
            "systemInstruction": {
                "parts": [{ "text": SYSTEM_INSTRUCTION }]
            },
            "contents": [{
                "role": "user",
                "parts": [{ "text": prompt }]
            }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
                "thinkingConfig": { "thinkingBudget": 0 }
            }
        })
    }
}

impl Translator for GeminiTranslator {
    fn translate(&self, keys: &BTreeSet<String>, languages: &LanguageSet) -> Result<TranslationResponse> {
        info!(
            model = %self.model,
            keys = keys.len(),
            languages = languages.len(),
            "requesting translations"
        );
        let prompt = user_prompt(keys, languages);
        debug!(%prompt, "prompt");

        let response = self
            .client
            .post(self.url())
            .header(API_KEY_HEADER, &self.api_key)
            .json(&Self::request_body(&prompt))
            .send()
            .map_err(|err| LocalizerError::ExternalService(format!("request failed: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(LocalizerError::ExternalService(format!(
                "{} returned {}: {}",
                self.model,
                status,
                truncate(body.trim(), MAX_ERROR_BODY)
            )));
        }

        let envelope: GenerateContentResponse = response
            .json()
            .map_err(|err| LocalizerError::ExternalService(format!("unreadable response: {err}")))?;
        let text = envelope.into_text()?;
        debug!(bytes = text.len(), "structured output received");

        TranslationResponse::parse(&text)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first candidate, with its parts concatenated.
    fn into_text(self) -> Result<String> {
        let block_reason = self.prompt_feedback.and_then(|feedback| feedback.block_reason);
        let Some(candidate) = self.candidates.into_iter().next() else {
            return Err(LocalizerError::ExternalService(match block_reason {
                Some(reason) => format!("prompt blocked: {reason}"),
                None => "response contained no candidates".to_string(),
            }));
        };

        let text: String = candidate
            .content
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect();

        if text.trim().is_empty() {
            return Err(LocalizerError::ExternalService(format!(
                "candidate had no text (finish reason: {})",
                candidate.finish_reason.as_deref().unwrap_or("unknown")
            )));
        }
        Ok(text)
    }
}

fn truncate(text: &str, max: usize) -> &str {
    match text.char_indices().nth(max) {
        Some((index, _)) => &text[..index],
        None => text,
    }
}
