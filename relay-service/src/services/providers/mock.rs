//! Mock provider implementation for testing.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use crate::services::schema::Schema;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// A request the mock received.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub prompt: String,
    pub schema: Option<Schema>,
}

/// Scripted text provider.
///
/// Replies are consumed in order; once the script runs out the last reply is
/// repeated. A `failing` mock answers every call with the same error.
pub struct MockTextProvider {
    replies: Mutex<VecDeque<Result<String, ProviderError>>>,
    last: Mutex<Option<Result<String, ProviderError>>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTextProvider {
    /// Always answer with `text` as the model output.
    pub fn with_response(text: impl Into<String>) -> Self {
        Self::scripted(vec![Ok(text.into())])
    }

    /// Always fail with `error`.
    pub fn failing(error: ProviderError) -> Self {
        Self::scripted(vec![Err(error)])
    }

    pub fn scripted(replies: Vec<Result<String, ProviderError>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            last: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Everything received so far, oldest first.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }

    fn next_reply(&self) -> Result<String, ProviderError> {
        let popped = self.replies.lock().ok().and_then(|mut q| q.pop_front());
        let mut last = match self.last.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if let Some(reply) = popped {
            *last = Some(reply);
        }
        last.clone().unwrap_or_else(|| {
            Err(ProviderError::NotConfigured(
                "Mock text provider has no scripted replies".to_string(),
            ))
        })
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(RecordedCall {
                prompt: prompt.to_string(),
                schema: params.output_schema.clone(),
            });
        }

        let text = self.next_reply()?;

        Ok(ProviderResponse {
            input_tokens: prompt.len() as i32 / 4,
            output_tokens: text.len() as i32 / 4,
            text,
            finish_reason: FinishReason::Complete,
        })
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn repeats_last_reply_after_script_ends() {
        let mock = MockTextProvider::scripted(vec![
            Err(ProviderError::RateLimited),
            Ok("{}".to_string()),
        ]);
        let params = GenerationParams::default();

        assert_eq!(
            mock.generate("a", &params).await.unwrap_err(),
            ProviderError::RateLimited
        );
        assert_eq!(mock.generate("b", &params).await.unwrap().text, "{}");
        assert_eq!(mock.generate("c", &params).await.unwrap().text, "{}");

        let prompts: Vec<String> = mock.calls().into_iter().map(|c| c.prompt).collect();
        assert_eq!(prompts, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn empty_script_is_not_configured() {
        let mock = MockTextProvider::scripted(vec![]);
        let err = mock
            .generate("x", &GenerationParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::NotConfigured(_)));
    }
}
