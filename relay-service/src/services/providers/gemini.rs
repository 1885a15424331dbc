//! Gemini AI provider implementation.
//!
//! Implements structured JSON generation against Google's Gemini
//! `generateContent` endpoint.

use super::{FinishReason, GenerationParams, ProviderError, ProviderResponse, TextProvider};
use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    /// e.g. `https://generativelanguage.googleapis.com/v1beta`
    pub api_base: String,
    pub timeout: Duration,
}

/// Gemini text provider. One instance (and one connection pool) per process.
pub struct GeminiTextProvider {
    config: GeminiConfig,
    client: Client,
}

impl GeminiTextProvider {
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        if config.api_key.expose_secret().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ProviderError::NotConfigured(format!("HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base.trim_end_matches('/'),
            self.config.model,
            method
        )
    }
}

/// Build the request body for a single-turn prompt.
fn build_request(prompt: &str, params: &GenerationParams) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(prompt.to_string()),
                thought: None,
            }],
        }],
        generation_config: Some(GenerationConfig {
            response_mime_type: params
                .output_schema
                .as_ref()
                .map(|_| "application/json".to_string()),
            response_schema: params.output_schema.as_ref().map(|s| s.to_gemini()),
        }),
    }
}

/// Pull the answer text out of a decoded API response.
fn extract_response(api_response: GenerateContentResponse) -> Result<ProviderResponse, ProviderError> {
    let blocked = api_response
        .prompt_feedback
        .as_ref()
        .and_then(|f| f.block_reason.as_ref())
        .is_some();
    if blocked {
        return Err(ProviderError::ContentFiltered);
    }

    let candidate = api_response
        .candidates
        .into_iter()
        .next()
        .ok_or(ProviderError::EmptyResponse)?;

    let finish_reason = match candidate.finish_reason.as_deref() {
        Some("MAX_TOKENS") => FinishReason::Length,
        Some("SAFETY") | Some("PROHIBITED_CONTENT") | Some("BLOCKLIST") => {
            FinishReason::ContentFilter
        }
        _ => FinishReason::Complete,
    };

    if finish_reason == FinishReason::ContentFilter {
        return Err(ProviderError::ContentFiltered);
    }

    // Thinking models may emit reasoning parts ahead of the answer.
    let text: String = candidate
        .content
        .map(|c| c.parts)
        .unwrap_or_default()
        .into_iter()
        .filter(|p| !p.thought.unwrap_or(false))
        .filter_map(|p| p.text)
        .collect();

    if text.trim().is_empty() {
        return Err(ProviderError::EmptyResponse);
    }

    let usage = api_response.usage_metadata.unwrap_or_default();

    Ok(ProviderResponse {
        text,
        input_tokens: usage.prompt_token_count.unwrap_or(0),
        output_tokens: usage.candidates_token_count.unwrap_or(0),
        finish_reason,
    })
}

#[async_trait]
impl TextProvider for GeminiTextProvider {
    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let request = build_request(prompt, params);
        let url = self.api_url("generateContent");

        tracing::debug!(
            model = %self.config.model,
            prompt_len = prompt.len(),
            structured = params.output_schema.is_some(),
            "Sending request to Gemini API"
        );

        let response = self
            .client
            .post(&url)
            .header(API_KEY_HEADER, self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            if status.as_u16() == 429 {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        let api_response: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::ApiError(format!("Failed to parse response: {}", e)))?;

        let result = extract_response(api_response)?;

        tracing::debug!(
            model = %self.config.model,
            input_tokens = result.input_tokens,
            output_tokens = result.output_tokens,
            finish_reason = ?result.finish_reason,
            "Gemini response received"
        );

        Ok(result)
    }

    fn name(&self) -> &'static str {
        "gemini"
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    thought: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
    #[serde(default)]
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    prompt_token_count: Option<i32>,
    candidates_token_count: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::schema::Schema;
    use serde_json::json;

    fn decode(value: serde_json::Value) -> GenerateContentResponse {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn request_carries_schema_and_mime_type() {
        let schema = Schema::object(vec![("orderNumber", Schema::string())]);
        let request = build_request("下单", &GenerationParams::structured(schema.clone()));
        let body = serde_json::to_value(&request).unwrap();

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "下单");
        assert!(body["contents"][0]["parts"][0].get("thought").is_none());
        assert_eq!(body["generationConfig"]["responseMimeType"], "application/json");
        assert_eq!(body["generationConfig"]["responseSchema"], schema.to_gemini());
    }

    #[test]
    fn plain_request_has_no_schema() {
        let request = build_request("hi", &GenerationParams::default());
        let body = serde_json::to_value(&request).unwrap();
        assert!(body["generationConfig"].get("responseSchema").is_none());
        assert!(body["generationConfig"].get("responseMimeType").is_none());
    }

    #[test]
    fn extracts_text_and_usage() {
        let response = extract_response(decode(json!({
            "candidates": [{
                "content": { "role": "model", "parts": [
                    { "text": "thinking...", "thought": true },
                    { "text": "{\"orderNumber\":" },
                    { "text": "\"ORD-123456\"}" }
                ]},
                "finishReason": "STOP"
            }],
            "usageMetadata": { "promptTokenCount": 12, "candidatesTokenCount": 7, "totalTokenCount": 19 }
        })))
        .unwrap();

        assert_eq!(response.text, "{\"orderNumber\":\"ORD-123456\"}");
        assert_eq!(response.input_tokens, 12);
        assert_eq!(response.output_tokens, 7);
        assert_eq!(response.finish_reason, FinishReason::Complete);
    }

    #[test]
    fn max_tokens_is_reported_as_length() {
        let response = extract_response(decode(json!({
            "candidates": [{ "content": { "parts": [{ "text": "{\"menu\": [" }] }, "finishReason": "MAX_TOKENS" }]
        })))
        .unwrap();
        assert_eq!(response.finish_reason, FinishReason::Length);
    }

    #[test]
    fn safety_stop_is_content_filtered() {
        let err = extract_response(decode(json!({
            "candidates": [{ "content": { "parts": [] }, "finishReason": "SAFETY" }]
        })))
        .unwrap_err();
        assert_eq!(err, ProviderError::ContentFiltered);
    }

    #[test]
    fn blocked_prompt_is_content_filtered() {
        let err = extract_response(decode(json!({
            "promptFeedback": { "blockReason": "OTHER" }
        })))
        .unwrap_err();
        assert_eq!(err, ProviderError::ContentFiltered);
    }

    #[test]
    fn no_candidates_is_empty() {
        let err = extract_response(decode(json!({ "candidates": [] }))).unwrap_err();
        assert_eq!(err, ProviderError::EmptyResponse);

        let err = extract_response(decode(json!({
            "candidates": [{ "finishReason": "STOP" }]
        })))
        .unwrap_err();
        assert_eq!(err, ProviderError::EmptyResponse);
    }

    #[test]
    fn rejects_empty_key() {
        let result = GeminiTextProvider::new(GeminiConfig {
            api_key: Secret::new(String::new()),
            model: "gemini-2.5-flash".to_string(),
            api_base: "http://localhost".to_string(),
            timeout: Duration::from_secs(1),
        });
        assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
    }

    #[test]
    fn api_url_tolerates_trailing_slash() {
        let provider = GeminiTextProvider::new(GeminiConfig {
            api_key: Secret::new("k".to_string()),
            model: "gemini-2.5-flash".to_string(),
            api_base: "http://localhost:1234/v1beta/".to_string(),
            timeout: Duration::from_secs(1),
        })
        .unwrap();
        assert_eq!(
            provider.api_url("generateContent"),
            "http://localhost:1234/v1beta/models/gemini-2.5-flash:generateContent"
        );
    }
}
