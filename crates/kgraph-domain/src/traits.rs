//! Trait definitions for external interactions
//!
//! These traits define the boundary between the extraction pipeline and the
//! language model. Infrastructure implementations live in other crates.

/// Structured-output hint forwarded to the model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    /// Plain text reply
    Text,

    /// Ask the model to reply with a single JSON object
    JsonObject,
}

impl ResponseFormat {
    /// Wire name used by OpenAI-compatible APIs
    pub fn as_str(&self) -> &'static str {
        match self {
            ResponseFormat::Text => "text",
            ResponseFormat::JsonObject => "json_object",
        }
    }
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (kgraph-llm). Calls are blocking;
/// the pipeline processes one chunk at a time.
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate a reply to a system instruction and a user instruction
    fn chat(&self, system_prompt: &str, user_prompt: &str) -> Result<String, Self::Error>;

    /// Generate a reply with a structured-output hint (if supported)
    fn chat_structured(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        format: ResponseFormat,
    ) -> Result<String, Self::Error>;
}
