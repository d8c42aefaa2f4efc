//! OpenAI-compatible Provider Implementation
//!
//! Talks to any server exposing the `/chat/completions` endpoint (OpenAI,
//! Azure-style gateways, vLLM, Ollama's OpenAI shim, ...).
//!
//! # Features
//!
//! - Blocking HTTP communication (one call per chunk, in order)
//! - Configurable endpoint, model, temperature and token limit
//! - Optional `json_object` response format
//! - Request timeout; no retries
//!
//! # Examples
//!
//! ```no_run
//! use kgraph_llm::{OpenAiConfig, OpenAiProvider};
//! use kgraph_domain::traits::LlmProvider;
//!
//! let config = OpenAiConfig::default().with_api_key_from_env();
//! let provider = OpenAiProvider::new(config).expect("OPENAI_API_KEY must be set");
//! let reply = provider.chat("You are terse.", "Say hello").unwrap();
//! println!("{}", reply);
//! ```

use crate::LlmError;
use kgraph_domain::traits::{LlmProvider as LlmProviderTrait, ResponseFormat};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Default request timeout (2 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Environment variable holding the API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Connection and sampling parameters for [`OpenAiProvider`]
#[derive(Debug, Clone, PartialEq)]
pub struct OpenAiConfig {
    /// API key; required
    pub api_key: Option<String>,

    /// API base URL, without the trailing `/chat/completions`
    pub base_url: String,

    /// Model identifier
    pub model: String,

    /// Sampling temperature
    pub temperature: f32,

    /// Maximum tokens in the reply
    pub max_tokens: u32,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: 0.0,
            max_tokens: 4096,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl OpenAiConfig {
    /// Fill in the API key from `OPENAI_API_KEY` if none is set
    pub fn with_api_key_from_env(mut self) -> Self {
        if self.api_key.is_none() {
            self.api_key = std::env::var(API_KEY_ENV).ok();
        }
        self
    }
}

/// Model configuration without the secret, for display
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    /// Model identifier
    pub model: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Maximum tokens in the reply
    pub max_tokens: u32,
    /// API base URL
    pub base_url: String,
}

/// OpenAI-compatible chat completions provider
pub struct OpenAiProvider {
    config: OpenAiConfig,
    api_key: String,
    client: reqwest::blocking::Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormatBody {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormatBody>,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Errors
    ///
    /// Returns [`LlmError::MissingCredentials`] if no non-empty API key is
    /// configured, and [`LlmError::Other`] if the HTTP client cannot be built.
    pub fn new(config: OpenAiConfig) -> Result<Self, LlmError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                LlmError::MissingCredentials(format!(
                    "API key is required. Set the {} environment variable.",
                    API_KEY_ENV
                ))
            })?;

        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            api_key,
            client,
        })
    }

    /// Current model configuration
    pub fn model_info(&self) -> ModelInfo {
        ModelInfo {
            model: self.config.model.clone(),
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            base_url: self.config.base_url.clone(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }

    fn build_request<'a>(
        &'a self,
        system_prompt: &'a str,
        user_prompt: &'a str,
        format: ResponseFormat,
    ) -> ChatCompletionRequest<'a> {
        let response_format = match format {
            ResponseFormat::Text => None,
            ResponseFormat::JsonObject => Some(ResponseFormatBody {
                kind: format.as_str(),
            }),
        };

        ChatCompletionRequest {
            model: &self.config.model,
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
            temperature: self.config.temperature,
            max_tokens: self.config.max_tokens,
            response_format,
        }
    }

    fn send(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, LlmError> {
        let request = self.build_request(system_prompt, user_prompt, format);

        debug!(model = %self.config.model, "Sending chat completion request");

        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        match status {
            s if s.is_success() => extract_content(&body),
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Err(LlmError::Authentication(format!("HTTP {}: {}", status, body)))
            }
            reqwest::StatusCode::NOT_FOUND => {
                Err(LlmError::ModelNotAvailable(self.config.model.clone()))
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(LlmError::RateLimitExceeded),
            _ => Err(LlmError::Communication(format!("HTTP {}: {}", status, body))),
        }
    }
}

/// Pull the first choice's message text out of a completion response body
fn extract_content(body: &str) -> Result<String, LlmError> {
    let parsed: ChatCompletionResponse = serde_json::from_str(body)
        .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .ok_or_else(|| LlmError::InvalidResponse("Response has no message content".to_string()))
}

impl LlmProviderTrait for OpenAiProvider {
    type Error = LlmError;

    fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String, Self::Error> {
        self.send(system_prompt, user_prompt, ResponseFormat::Text)
    }

    fn chat_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, Self::Error> {
        self.send(system_prompt, user_prompt, format)
    }
}
