//! LLM provider implementations.
//!
//! Contains concrete implementations of the [`LlmProvider`] trait defined
//! in `wayfarer-core`: Hugging Face hosted inference (the default) and any
//! OpenAI-compatible chat completions API.
//!
//! [`create_provider`] builds the configured provider at startup.
//!
//! [`LlmProvider`]: wayfarer_core::llm::provider::LlmProvider

pub mod huggingface;
pub mod openai_compat;

use std::time::Duration;

use secrecy::SecretString;

use wayfarer_core::llm::box_provider::BoxLlmProvider;
use wayfarer_types::config::LlmConfig;
use wayfarer_types::llm::{LlmError, ProviderType};

use self::huggingface::HuggingFaceProvider;
use self::openai_compat::OpenAiCompatibleProvider;
use self::openai_compat::config::{OpenAiCompatConfig, openai_defaults, provider_name_for};

/// Create a [`BoxLlmProvider`] from the `[llm]` config section.
///
/// # Errors
///
/// Returns [`LlmError::AuthenticationFailed`] when no API key is available;
/// both hosted backends require one.
pub fn create_provider(
    config: &LlmConfig,
    api_key: Option<SecretString>,
) -> Result<BoxLlmProvider, LlmError> {
    let key = api_key.ok_or(LlmError::AuthenticationFailed)?;

    match config.provider {
        ProviderType::HuggingFace => {
            let mut provider = HuggingFaceProvider::new(
                key,
                config.model.clone(),
                Duration::from_secs(config.timeout_secs),
            )?;
            if let Some(ref base_url) = config.base_url {
                provider = provider.with_base_url(base_url.as_str());
            }
            Ok(BoxLlmProvider::new(provider))
        }
        ProviderType::OpenAiCompatible => {
            let provider = match config.base_url.as_deref() {
                Some(base_url) => OpenAiCompatibleProvider::new(OpenAiCompatConfig {
                    provider_name: provider_name_for(base_url).to_string(),
                    base_url: base_url.to_string(),
                    api_key: key,
                    model: config.model.clone(),
                }),
                None => OpenAiCompatibleProvider::new(openai_defaults(key, &config.model)),
            };
            Ok(BoxLlmProvider::new(provider))
        }
    }
}
