//! HuggingFaceProvider -- concrete [`LlmProvider`] for hosted text generation.
//!
//! Sends the flattened prompt to `{base_url}/models/{model}` with a bearer
//! token. Stop sequences are passed to the API and also enforced locally,
//! because not every hosted model honours them.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};

use wayfarer_core::llm::provider::{LlmProvider, truncate_at_stop};
use wayfarer_types::llm::{CompletionRequest, CompletionResponse, LlmError, StopReason, Usage};

use super::types::{
    GeneratedText, InferenceErrorBody, InferenceOptions, InferenceParameters, InferenceRequest,
};

/// Default serverless inference endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api-inference.huggingface.co";

/// Hugging Face Inference API provider.
///
/// Does not derive Debug so the client and key never end up in logs.
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl HuggingFaceProvider {
    /// Create a provider for `model` (a repo id such as `google/flan-t5-base`).
    pub fn new(api_key: SecretString, model: String, timeout: Duration) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model,
        })
    }

    /// Override the base URL (useful for testing or dedicated endpoints).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self, model: &str) -> String {
        format!("{}/models/{}", self.base_url, model)
    }

    /// Text-generation takes a single string, so the system prompt and
    /// messages are joined in order.
    fn to_inference_request(request: &CompletionRequest) -> InferenceRequest {
        let mut parts: Vec<&str> = Vec::with_capacity(request.messages.len() + 1);
        if let Some(ref system) = request.system {
            parts.push(system);
        }
        parts.extend(request.messages.iter().map(|m| m.content.as_str()));

        InferenceRequest {
            inputs: parts.join("\n\n"),
            parameters: InferenceParameters {
                temperature: request.temperature,
                max_new_tokens: request.max_tokens,
                return_full_text: false,
                stop: request.stop_sequences.clone().unwrap_or_default(),
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        }
    }
}

/// Rough token estimate (~4 chars per token); the API reports no usage.
fn estimate_tokens(text: &str) -> u32 {
    u32::try_from(text.chars().count().div_ceil(4)).unwrap_or(u32::MAX)
}

impl LlmProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn complete(&self, request: &CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let model = if request.model.is_empty() {
            self.model.as_str()
        } else {
            request.model.as_str()
        };
        let body = Self::to_inference_request(request);

        let response = self
            .client
            .post(self.url(model))
            .bearer_auth(self.api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Provider {
                message: format!("HTTP request failed: {e}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<InferenceErrorBody>(&error_body)
                .map(|b| b.error)
                .unwrap_or(error_body);
            return Err(match status.as_u16() {
                400 | 422 => LlmError::InvalidRequest(detail),
                401 | 403 => LlmError::AuthenticationFailed,
                429 => LlmError::RateLimited,
                503 => LlmError::Overloaded(detail),
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {detail}"),
                },
            });
        }

        let generated: Vec<GeneratedText> = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;
        let raw = generated
            .into_iter()
            .next()
            .map(|g| g.generated_text)
            .ok_or_else(|| LlmError::Deserialization("empty generation list".to_string()))?;

        let stops = request.stop_sequences.as_deref().unwrap_or_default();
        let (content, stopped) = truncate_at_stop(&raw, stops);

        Ok(CompletionResponse {
            id: uuid::Uuid::now_v7().to_string(),
            usage: Usage {
                input_tokens: estimate_tokens(&body.inputs),
                output_tokens: estimate_tokens(&content),
            },
            content,
            model: model.to_string(),
            stop_reason: if stopped {
                StopReason::StopSequence
            } else {
                StopReason::EndTurn
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wayfarer_types::llm::Message;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn provider(server: &MockServer) -> HuggingFaceProvider {
        HuggingFaceProvider::new(
            SecretString::from("hf_test".to_string()),
            "google/flan-t5-base".to_string(),
            Duration::from_secs(5),
        )
        .unwrap()
        .with_base_url(server.uri())
    }

    fn request(stops: Option<Vec<String>>) -> CompletionRequest {
        CompletionRequest {
            model: String::new(),
            messages: vec![Message::user("Question: weather in Paris\nThought:")],
            system: None,
            max_tokens: 64,
            temperature: Some(0.0),
            stop_sequences: stops,
        }
    }

    #[tokio::test]
    async fn test_complete_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/models/google/flan-t5-base"))
            .and(header("authorization", "Bearer hf_test"))
            .and(body_partial_json(serde_json::json!({
                "inputs": "Question: weather in Paris\nThought:",
                "parameters": {"max_new_tokens": 64, "return_full_text": false}
            })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!([{"generated_text": " Final Answer: sunny"}])),
            )
            .mount(&server)
            .await;

        let resp = provider(&server).complete(&request(None)).await.unwrap();
        assert_eq!(resp.content, " Final Answer: sunny");
        assert_eq!(resp.model, "google/flan-t5-base");
        assert_eq!(resp.stop_reason, StopReason::EndTurn);
        assert!(resp.usage.input_tokens > 0);
    }

    #[tokio::test]
    async fn test_complete_truncates_at_stop_sequence() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{
                "generated_text": " check\nAction: OpenWeather\nAction Input: Paris\nObservation: made up"
            }])))
            .mount(&server)
            .await;

        let resp = provider(&server)
            .complete(&request(Some(vec!["\nObservation:".to_string()])))
            .await
            .unwrap();
        assert_eq!(resp.content, " check\nAction: OpenWeather\nAction Input: Paris");
        assert_eq!(resp.stop_reason, StopReason::StopSequence);
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_failed() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(serde_json::json!({"error": "Invalid credentials"})),
            )
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request(None)).await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_loading_model_maps_to_overloaded() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(503)
                    .set_body_json(serde_json::json!({"error": "Model is currently loading"})),
            )
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request(None)).await.unwrap_err();
        match err {
            LlmError::Overloaded(msg) => assert_eq!(msg, "Model is currently loading"),
            other => panic!("expected Overloaded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request(None)).await.unwrap_err();
        assert!(matches!(err, LlmError::RateLimited));
    }

    #[tokio::test]
    async fn test_empty_generation_list() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let err = provider(&server).complete(&request(None)).await.unwrap_err();
        assert!(matches!(err, LlmError::Deserialization(_)));
    }

    #[test]
    fn test_system_prompt_is_prepended() {
        let mut req = request(None);
        req.system = Some("You are a travel agent.".to_string());
        let body = HuggingFaceProvider::to_inference_request(&req);
        assert!(body.inputs.starts_with("You are a travel agent.\n\nQuestion:"));
    }
}
