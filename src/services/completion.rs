use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur when requesting a completion
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("Completion contained no message content")]
    EmptyResponse,

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

/// A single-prompt completion request
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub temperature: f32,
    pub max_tokens: u32,
}

/// Text-generation backend used by the gateway
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, CompletionError>;
}
