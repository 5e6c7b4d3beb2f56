//! Model Gateway — the single point of entry for all LLM calls.
//!
//! ARCHITECTURAL RULE: no other module may talk to the model endpoint
//! directly. Handlers and the batch orchestrator depend on the `ModelGateway`
//! trait, carried in `AppState` as `Arc<dyn ModelGateway>`, so tests can
//! substitute a stub without any network.
//!
//! There is deliberately NO retry here: a failed call degrades exactly one
//! resume, and the batch-level tolerate-and-continue policy is the sole
//! resilience mechanism.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Upper bound on one generateContent call. A timeout degrades that one
/// resume to an error record, never the whole batch.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("model API key is not configured")]
    MissingApiKey,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("model API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("unexpected response structure from model API")]
    UnexpectedStructure,
}

// Wire types for the generateContent contract:
// outbound {"contents":[{"parts":[{"text": <prompt>}]}]},
// inbound  candidates[0].content.parts[0].text.

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

/// Pulls the reply text out of the nested response shape; anything missing is
/// an unexpected-structure error.
fn reply_text(response: GenerateContentResponse) -> Result<String, LlmError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or(LlmError::UnexpectedStructure)
}

/// The outbound model call, abstracted so the batch orchestrator can be
/// exercised without a live endpoint.
#[async_trait]
pub trait ModelGateway: Send + Sync {
    /// Sends a finished prompt and returns the model's raw text reply.
    async fn generate(&self, prompt: &str) -> Result<String, LlmError>;
}

/// Production gateway over the Gemini-style generateContent HTTP API.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(endpoint: String, model: String, api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("failed to build HTTP client"),
            endpoint,
            model,
            api_key,
        }
    }

    fn url(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.endpoint.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl ModelGateway for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        if self.api_key.trim().is_empty() {
            return Err(LlmError::MissingApiKey);
        }

        let response = self
            .client
            .post(self.url())
            .query(&[("key", self.api_key.as_str())])
            .json(&GenerateContentRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = reply_text(parsed)?;
        debug!("model reply received ({} chars)", text.len());
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_matches_wire_contract() {
        let body = serde_json::to_value(GenerateContentRequest::new("evaluate this")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"contents": [{"parts": [{"text": "evaluate this"}]}]})
        );
    }

    #[test]
    fn test_reply_text_reads_nested_field() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"{\"score\": 70}"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(reply_text(response).unwrap(), "{\"score\": 70}");
    }

    #[test]
    fn test_missing_candidates_is_unexpected_structure() {
        let response: GenerateContentResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(matches!(
            reply_text(response),
            Err(LlmError::UnexpectedStructure)
        ));
    }

    #[test]
    fn test_empty_parts_is_unexpected_structure() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates":[{"content":{"parts":[]}}]}"#).unwrap();
        assert!(matches!(
            reply_text(response),
            Err(LlmError::UnexpectedStructure)
        ));
    }

    #[test]
    fn test_url_joins_endpoint_and_model() {
        let client = GeminiClient::new(
            "https://generativelanguage.googleapis.com/v1beta/".to_string(),
            "gemini-2.0-flash".to_string(),
            "key".to_string(),
        );
        assert_eq!(
            client.url(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[tokio::test]
    async fn test_missing_api_key_short_circuits() {
        let client = GeminiClient::new(
            "https://example.invalid".to_string(),
            "gemini-2.0-flash".to_string(),
            "  ".to_string(),
        );
        assert!(matches!(
            client.generate("prompt").await,
            Err(LlmError::MissingApiKey)
        ));
    }
}
