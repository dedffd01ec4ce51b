//! Text-generation client
//!
//! HTTP client for an OpenAI-compatible chat-completions service, the
//! external collaborator that turns script prompts into spoken-word text.
//! The engine only depends on the [`TextGenerator`] trait; this is the
//! production implementation.

use crate::error::{EngineError, EngineResult};
use crate::store::TextGenerator;
use async_trait::async_trait;
use reqwest::{header, Client};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default timeout for generation requests
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Chat-completions generation client
pub struct GenerationClient {
    http_client: Client,
    base_url: String,
    model: String,
}

impl GenerationClient {
    /// Create a new client.
    ///
    /// `base_url` is the service root (e.g. `https://api.example.com`);
    /// the chat-completions path is appended per request.
    pub fn new(base_url: &str, api_key: &str, model: &str) -> EngineResult<Self> {
        let mut headers = header::HeaderMap::new();
        let mut auth = header::HeaderValue::from_str(&format!("Bearer {api_key}"))
            .map_err(|e| EngineError::Generation(format!("Invalid API key header: {e}")))?;
        auth.set_sensitive(true);
        headers.insert(header::AUTHORIZATION, auth);

        let http_client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .default_headers(headers)
            .build()
            .map_err(|e| EngineError::Generation(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
        })
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: String,
}

#[async_trait]
impl TextGenerator for GenerationClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        temperature: f32,
        max_tokens: u32,
    ) -> EngineResult<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            temperature,
            max_tokens,
        };

        debug!(model = %self.model, temperature, "Requesting script generation");

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| EngineError::Generation(format!("Generation request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EngineError::Generation(format!(
                "Generation service returned error {status}: {body}"
            )));
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| EngineError::Generation(format!("Failed to parse generation response: {e}")))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| EngineError::Generation("Generation response had no choices".to_string()))?;

        Ok(choice.message.content)
    }
}
