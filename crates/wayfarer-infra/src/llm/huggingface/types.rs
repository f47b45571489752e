//! Inference API request/response types.
//!
//! These are Hugging Face specific wire shapes. The provider-agnostic LLM
//! types live in wayfarer-types.

use serde::{Deserialize, Serialize};

/// Request body for `POST /models/{model}`.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceRequest {
    pub inputs: String,
    pub parameters: InferenceParameters,
    pub options: InferenceOptions,
}

/// Generation parameters for the text-generation task.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    pub max_new_tokens: u32,
    /// Return only the continuation, not the prompt.
    pub return_full_text: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub stop: Vec<String>,
}

/// Request options understood by the hosted API.
#[derive(Debug, Clone, Serialize)]
pub struct InferenceOptions {
    /// Block until a cold model is loaded instead of returning 503.
    pub wait_for_model: bool,
}

/// One generated sequence. The API answers with a JSON array of these.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneratedText {
    pub generated_text: String,
}

/// Error body, e.g. `{"error": "Model is currently loading"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceErrorBody {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_empty_stop() {
        let req = InferenceRequest {
            inputs: "hi".to_string(),
            parameters: InferenceParameters {
                temperature: None,
                max_new_tokens: 8,
                return_full_text: false,
                stop: Vec::new(),
            },
            options: InferenceOptions {
                wait_for_model: true,
            },
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json["parameters"].get("stop").is_none());
        assert!(json["parameters"].get("temperature").is_none());
        assert_eq!(json["parameters"]["return_full_text"], false);
    }

    #[test]
    fn test_parse_generated_array() {
        let parsed: Vec<GeneratedText> =
            serde_json::from_str(r#"[{"generated_text":"Final Answer: go"}]"#).unwrap();
        assert_eq!(parsed[0].generated_text, "Final Answer: go");
    }
}
