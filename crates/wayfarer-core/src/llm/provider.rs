//! LlmProvider trait definition.
//!
//! This is the core abstraction that all hosted-model backends implement.
//! Responses are returned whole; there is no streaming path.

use wayfarer_types::llm::{CompletionRequest, CompletionResponse, LlmError};

/// Trait for LLM provider backends (Hugging Face, OpenAI-compatible, ...).
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition).
/// Implementations live in wayfarer-infra.
pub trait LlmProvider: Send + Sync {
    /// Human-readable provider name (e.g., "huggingface").
    fn name(&self) -> &str;

    /// Send a completion request and receive the full response.
    ///
    /// Providers must honor `request.stop_sequences` by cutting the
    /// generated text at the first occurrence of any of them.
    fn complete(
        &self,
        request: &CompletionRequest,
    ) -> impl std::future::Future<Output = Result<CompletionResponse, LlmError>> + Send;
}

/// Cut `text` at the earliest occurrence of any stop sequence.
///
/// Returns the truncated text and whether a stop sequence was found.
pub fn truncate_at_stop(text: &str, stop_sequences: &[String]) -> (String, bool) {
    let cut = stop_sequences
        .iter()
        .filter(|s| !s.is_empty())
        .filter_map(|s| text.find(s.as_str()))
        .min();
    match cut {
        Some(idx) => (text[..idx].to_string(), true),
        None => (text.to_string(), false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_at_earliest_stop() {
        let stops = vec!["\nObservation:".to_string(), "\n\tObservation:".to_string()];
        let (text, hit) = truncate_at_stop(
            "Action: OpenWeather\nAction Input: Paris\nObservation: sunny",
            &stops,
        );
        assert!(hit);
        assert_eq!(text, "Action: OpenWeather\nAction Input: Paris");
    }

    #[test]
    fn test_truncate_without_stop() {
        let (text, hit) = truncate_at_stop("Final Answer: go", &["\nObservation:".to_string()]);
        assert!(!hit);
        assert_eq!(text, "Final Answer: go");
    }
}
