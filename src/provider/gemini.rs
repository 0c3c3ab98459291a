//! Gemini `generateContent` client.
//!
//! One provider call is one HTTP POST asking the model for a JSON array that
//! follows [`prompt::movie_schema`]. The answer's text part is the array
//! itself; an empty answer counts as zero movies.

use super::backend::{MovieProvider, MovieQuery, ProviderError};
use super::prompt;
use crate::domain::Movie;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value as JsonValue};
use std::time::Duration;
use tracing::Instrument;

/// Default REST endpoint root.
pub const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model name.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Longest error body kept in an [`ProviderError::Api`] message.
const MAX_ERROR_BODY: usize = 512;

/// Connection settings for [`GeminiProvider`].
#[derive(Debug, Clone)]
pub struct GeminiSettings {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base_url: String,
    /// Sampling temperature for catalog batches. Recommendations use the
    /// model default.
    pub temperature: f32,
    pub request_timeout: Duration,
}

impl Default for GeminiSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            temperature: 0.7,
            request_timeout: Duration::from_secs(30),
        }
    }
}

/// [`MovieProvider`] backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiProvider {
    client: reqwest::Client,
    settings: GeminiSettings,
}

impl GeminiProvider {
    /// Creates a provider with its own HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built (TLS backend
    /// initialization failure).
    pub fn new(settings: GeminiSettings) -> Result<Self, ProviderError> {
        let client = reqwest::Client::builder()
            .timeout(settings.request_timeout)
            .build()?;
        Ok(Self { client, settings })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.settings.api_base_url.trim_end_matches('/'),
            self.settings.model
        )
    }

    async fn generate(&self, body: JsonValue) -> Result<Vec<Movie>, ProviderError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(ProviderError::MissingApiKey)?;

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            let mut message = text;
            if message.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|i| message.is_char_boundary(*i))
                    .unwrap_or(0);
                message.truncate(cut);
            }
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        movies_from_response(&text)
    }
}

#[async_trait]
impl MovieProvider for GeminiProvider {
    async fn fetch_movies(&self, query: &MovieQuery) -> Result<Vec<Movie>, ProviderError> {
        let span = tracing::debug_span!(
            "gemini_fetch_movies",
            model = %self.settings.model,
            has_search = query.search.is_some(),
            genre = ?query.genre,
            limit = query.limit
        );

        async {
            let body = request_body(&prompt::catalog_prompt(query), Some(self.settings.temperature));
            let movies = self.generate(body).await;

            match &movies {
                Ok(movies) => tracing::debug!(count = movies.len(), "catalog batch received"),
                Err(e) => tracing::warn!(error = %e, "catalog request failed"),
            }
            movies
        }
        .instrument(span)
        .await
    }

    async fn recommend(&self, title: &str, count: usize) -> Result<Vec<Movie>, ProviderError> {
        let span = tracing::debug_span!("gemini_recommend", title = %title, count = count);
        let body = request_body(&prompt::recommendation_prompt(title, count), None);
        self.generate(body).instrument(span).await
    }
}

/// Builds a `generateContent` body requesting schema-constrained JSON.
fn request_body(prompt_text: &str, temperature: Option<f32>) -> JsonValue {
    let mut generation_config = json!({
        "responseMimeType": "application/json",
        "responseSchema": prompt::movie_schema(),
    });
    if let Some(temperature) = temperature {
        generation_config["temperature"] = json!(temperature);
    }

    json!({
        "contents": [{ "role": "user", "parts": [{ "text": prompt_text }] }],
        "generationConfig": generation_config,
    })
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
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
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

/// Decodes a `generateContent` response body into movies.
///
/// # Errors
///
/// Returns [`ProviderError::Blocked`] when the prompt was refused and
/// [`ProviderError::Parse`] when either the envelope or the answer text is not
/// valid JSON of the expected shape.
pub fn movies_from_response(body: &str) -> Result<Vec<Movie>, ProviderError> {
    let response: GenerateContentResponse = serde_json::from_str(body)?;

    if let Some(reason) = response
        .prompt_feedback
        .and_then(|feedback| feedback.block_reason)
    {
        return Err(ProviderError::Blocked(reason));
    }

    let text: String = response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    Ok(serde_json::from_str(text)?)
}
