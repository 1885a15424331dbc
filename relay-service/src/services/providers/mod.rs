//! Model provider abstractions and implementations.
//!
//! The relay talks to a [`TextProvider`] trait object so the Gemini client can
//! be swapped for [`mock::MockTextProvider`] in tests.

pub mod gemini;
pub mod mock;

use crate::services::schema::Schema;
use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Model returned no text")]
    EmptyResponse,
}

impl ProviderError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network",
            ProviderError::EmptyResponse => "empty_response",
        }
    }
}

/// Result of a provider call.
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    /// JSON text produced by the model.
    pub text: String,

    pub input_tokens: i32,

    pub output_tokens: i32,

    pub finish_reason: FinishReason,
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Generation parameters for a single request.
#[derive(Debug, Clone, Default)]
pub struct GenerationParams {
    /// Structured output shape; implies a JSON response.
    pub output_schema: Option<Schema>,
}

impl GenerationParams {
    pub fn structured(schema: Schema) -> Self {
        Self {
            output_schema: Some(schema),
        }
    }
}

/// Trait for structured text generation providers (e.g., Gemini).
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Generate a single, non-streaming response.
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError>;

    /// Name used in logs.
    fn name(&self) -> &'static str;
}
