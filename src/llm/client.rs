//! Chat-completions client for text-generation providers.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ProviderError;
use crate::llm::provider::Provider;

/// Title sent to providers that attribute traffic by application.
const APP_TITLE: &str = "bgit";

/// Trait for issuing a single completion request.
///
/// This abstraction allows mocking provider calls in tests.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Complete `prompt` with `provider`'s model and return the generated text.
    async fn complete(
        &self,
        provider: &Provider,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, ProviderError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Client for OpenAI-compatible `/chat/completions` endpoints.
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: Client,
}

impl HttpCompletionClient {
    pub fn new() -> Result<Self, ProviderError> {
        let client = Client::builder()
            .build()
            .map_err(ProviderError::ClientBuild)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(
        &self,
        provider: &Provider,
        api_key: &str,
        prompt: &str,
    ) -> Result<String, ProviderError> {
        let url = provider.completions_url();
        let body = ChatRequest {
            model: &provider.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        debug!("Requesting completion from {} at {}", provider, url);

        let response = self
            .client
            .post(&url)
            .bearer_auth(api_key)
            .header("X-Title", APP_TITLE)
            .json(&body)
            .send()
            .await
            .map_err(ProviderError::Request)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response.json().await.map_err(ProviderError::Request)?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(ProviderError::EmptyResponse)
    }
}
