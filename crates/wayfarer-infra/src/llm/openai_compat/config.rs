//! Configuration and well-known endpoints for OpenAI-compatible providers.

use secrecy::SecretString;

/// Configuration for an OpenAI-compatible LLM provider.
///
/// Used to construct an [`super::OpenAiCompatibleProvider`].
pub struct OpenAiCompatConfig {
    /// Human-readable provider name (e.g., "openai", "gemini").
    pub provider_name: String,
    /// Base URL for the API (e.g., "https://api.openai.com/v1").
    pub base_url: String,
    pub api_key: SecretString,
    /// Default model when a request leaves it empty.
    pub model: String,
}

/// Base URL for a well-known provider name, if any.
pub fn known_base_url(provider_name: &str) -> Option<&'static str> {
    match provider_name {
        "openai" => Some("https://api.openai.com/v1"),
        "gemini" => Some("https://generativelanguage.googleapis.com/v1beta/openai"),
        "mistral" => Some("https://api.mistral.ai/v1"),
        _ => None,
    }
}

/// Infer a provider name from a base URL, for span attributes.
pub fn provider_name_for(base_url: &str) -> &'static str {
    if base_url.contains("googleapis.com") {
        "gemini"
    } else if base_url.contains("mistral.ai") {
        "mistral"
    } else if base_url.contains("openai.com") {
        "openai"
    } else {
        "openai_compatible"
    }
}

/// OpenAI default configuration.
pub fn openai_defaults(api_key: SecretString, model: &str) -> OpenAiCompatConfig {
    OpenAiCompatConfig {
        provider_name: "openai".into(),
        base_url: "https://api.openai.com/v1".into(),
        api_key,
        model: model.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_base_urls() {
        assert_eq!(known_base_url("mistral"), Some("https://api.mistral.ai/v1"));
        assert!(known_base_url("somewhere").is_none());
    }

    #[test]
    fn test_provider_name_for_url() {
        assert_eq!(
            provider_name_for("https://generativelanguage.googleapis.com/v1beta/openai"),
            "gemini"
        );
        assert_eq!(provider_name_for("http://localhost:11434/v1"), "openai_compatible");
    }
}
