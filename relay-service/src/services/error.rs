use super::providers::ProviderError;
use super::schema::SchemaViolation;
use thiserror::Error;

/// Why a model-backed answer could not be produced.
///
/// Every variant is absorbed by the route handlers and answered with fallback
/// data; none of them reaches the caller as a non-200 status.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error("model call failed: {0}")]
    Provider(#[from] ProviderError),

    #[error("model output is not valid JSON for the expected type: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("model output does not match the schema at {0}")]
    SchemaMismatch(#[from] SchemaViolation),
}

impl GenerationError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Provider(e) => e.kind(),
            GenerationError::Parse(_) => "parse",
            GenerationError::SchemaMismatch(_) => "schema_mismatch",
        }
    }
}
