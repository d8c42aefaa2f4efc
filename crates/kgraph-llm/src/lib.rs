//! kgraph LLM Provider Layer
//!
//! Pluggable LLM provider implementations of the `LlmProvider` trait from
//! `kgraph-domain`.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use kgraph_llm::MockProvider;
//! use kgraph_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new(r#"[{"subject": "a", "predicate": "b", "object": "c"}]"#);
//! let reply = provider.chat("system", "user").unwrap();
//! assert!(reply.starts_with('['));
//! ```

#![warn(missing_docs)]

pub mod openai;

use kgraph_domain::traits::{LlmProvider as LlmProviderTrait, ResponseFormat};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;

pub use openai::{OpenAiConfig, OpenAiProvider};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The API rejected the credentials
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// No API key was configured
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit or quota exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockReply {
    Text(String),
    Error(String),
}

impl MockReply {
    fn into_result(self) -> Result<String, LlmError> {
        match self {
            MockReply::Text(text) => Ok(text),
            MockReply::Error(message) => Err(LlmError::Other(message)),
        }
    }
}

#[derive(Debug, Default)]
struct MockState {
    queued: VecDeque<MockReply>,
    keyed: Vec<(String, MockReply)>,
    call_count: usize,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are chosen in this order:
///
/// 1. the next queued reply (see [`MockProvider::push_response`]), if any
/// 2. the first keyed reply whose key occurs in the user prompt
/// 3. the default reply
///
/// Clones share state, so a test can keep a handle to inspect the call count
/// after moving the provider into an extractor.
///
/// # Examples
///
/// ```
/// use kgraph_llm::MockProvider;
/// use kgraph_domain::traits::LlmProvider;
///
/// let mut provider = MockProvider::new("[]");
/// provider.add_response("radium", r#"[{"subject": "curie", "predicate": "discovered", "object": "radium"}]"#);
///
/// assert_eq!(provider.chat("sys", "nothing here").unwrap(), "[]");
/// assert!(provider.chat("sys", "she found radium").unwrap().contains("curie"));
/// assert_eq!(provider.call_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_response: String,
    state: Arc<Mutex<MockState>>,
}

impl MockProvider {
    /// Create a new MockProvider with a fixed response for all prompts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            state: Arc::new(Mutex::new(MockState::default())),
        }
    }

    /// Reply with `response` whenever the user prompt contains `key`
    pub fn add_response(&mut self, key: impl Into<String>, response: impl Into<String>) {
        self.lock()
            .keyed
            .push((key.into(), MockReply::Text(response.into())));
    }

    /// Fail whenever the user prompt contains `key`
    pub fn add_error(&mut self, key: impl Into<String>) {
        self.lock()
            .keyed
            .push((key.into(), MockReply::Error("Mock error".to_string())));
    }

    /// Queue a reply for the next call, ahead of keyed and default replies
    pub fn push_response(&self, response: impl Into<String>) {
        self.lock().queued.push_back(MockReply::Text(response.into()));
    }

    /// Queue a failure for the next call
    pub fn push_error(&self, message: impl Into<String>) {
        self.lock().queued.push_back(MockReply::Error(message.into()));
    }

    /// Get the number of times the provider was called
    pub fn call_count(&self) -> usize {
        self.lock().call_count
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        self.lock().call_count = 0;
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn reply(&self, user_prompt: &str) -> Result<String, LlmError> {
        let mut state = self.lock();
        state.call_count += 1;

        if let Some(reply) = state.queued.pop_front() {
            return reply.into_result();
        }

        let keyed = state
            .keyed
            .iter()
            .find(|(key, _)| user_prompt.contains(key.as_str()))
            .map(|(_, reply)| reply.clone());

        match keyed {
            Some(reply) => reply.into_result(),
            None => Ok(self.default_response.clone()),
        }
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("[]")
    }
}

impl LlmProviderTrait for MockProvider {
    type Error = LlmError;

    fn chat(&self, _system_prompt: &str, user_prompt: &str) -> Result<String, Self::Error> {
        self.reply(user_prompt)
    }

    fn chat_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        _format: ResponseFormat,
    ) -> Result<String, Self::Error> {
        // The mock ignores the format hint; tests script the exact reply text
        self.chat(system_prompt, user_prompt)
    }
}
