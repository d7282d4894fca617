//! Gemini `generateContent` client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Advisor, AdvisoryError, AdvisoryRequest};
use crate::config::AdvisoryConfig;

/// One-shot advisor backed by the Gemini REST API.
#[derive(Debug, Clone)]
pub struct GeminiAdvisor {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct GenerateResponse {
    candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidateContent {
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct CandidatePart {
    text: Option<String>,
}

impl GeminiAdvisor {
    /// Builds a client with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisoryError::Transport`] if the HTTP client cannot be built.
    pub fn new(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AdvisoryError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AdvisoryError::Transport(e.to_string()))?;
        Ok(Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
        })
    }

    /// Builds an advisor from config, reading the key from `api_key_env`.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisoryError::MissingApiKey`] when the variable is unset
    /// or blank.
    pub fn from_config(cfg: &AdvisoryConfig) -> Result<Self, AdvisoryError> {
        let key = std::env::var(&cfg.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AdvisoryError::MissingApiKey(cfg.api_key_env.clone()))?;
        Self::new(
            &cfg.endpoint,
            &cfg.model,
            key,
            Duration::from_secs(cfg.timeout_secs),
        )
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent?key={}",
            self.endpoint, self.model, self.api_key
        )
    }
}

/// First candidate's first text part, trimmed.
fn extract_text(response: GenerateResponse) -> Result<String, AdvisoryError> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or_else(|| AdvisoryError::Malformed("no candidate text".into()))?;
    let text = text.trim();
    if text.is_empty() {
        return Err(AdvisoryError::Malformed("empty candidate text".into()));
    }
    Ok(text.to_string())
}

#[async_trait]
impl Advisor for GeminiAdvisor {
    async fn advise(&self, request: &AdvisoryRequest) -> Result<String, AdvisoryError> {
        let prompt = request.prompt();
        let body = GenerateRequest {
            contents: [Content {
                parts: [Part { text: &prompt }],
            }],
        };
        debug!(model = %self.model, "requesting advisory");

        let response = self
            .client
            .post(self.url())
            .json(&body)
            .send()
            .await
            .map_err(|err| {
                debug!(?err, "advisory transport failure");
                AdvisoryError::Transport(err.without_url().to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AdvisoryError::Status(status.as_u16()));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AdvisoryError::Malformed(e.without_url().to_string()))?;
        extract_text(parsed)
    }
}
