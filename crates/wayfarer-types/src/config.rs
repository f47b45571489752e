//! Application configuration types for Wayfarer.
//!
//! `AppConfig` represents the top-level `config.toml`. Every section and
//! field has a default, so an empty file (or no file) yields a working
//! configuration. Secrets are never part of this file; they come from the
//! environment.

use serde::{Deserialize, Serialize};

use crate::agent::AgentConfig;
use crate::llm::ProviderType;
use crate::memory::DEFAULT_EMBEDDING_DIMENSION;

/// Top-level configuration loaded from `config.toml`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub agent: AgentSettings,
    #[serde(default)]
    pub memory: MemoryConfig,
    #[serde(default)]
    pub weather: WeatherConfig,
    #[serde(default)]
    pub travel: TravelConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Agent runtime settings derived from the `[llm]` and `[agent]` sections.
    pub fn agent_config(&self) -> AgentConfig {
        AgentConfig {
            model: self.llm.model.clone(),
            temperature: self.llm.temperature,
            max_tokens: self.llm.max_tokens,
            max_iterations: self.agent.max_iterations,
        }
    }
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Identity store location. `None` means `{data_dir}/wayfarer.db`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: Option<String>,
}

/// Hosted language model settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default)]
    pub provider: ProviderType,
    #[serde(default = "default_model")]
    pub model: String,
    /// Override the provider's default endpoint.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub temperature: f64,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Name of the environment variable holding the provider API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_llm_timeout")]
    pub timeout_secs: u64,
}

fn default_model() -> String {
    "google/flan-t5-base".to_string()
}

fn default_max_tokens() -> u32 {
    512
}

fn default_api_key_env() -> String {
    "HUGGINGFACEHUB_API_TOKEN".to_string()
}

fn default_llm_timeout() -> u64 {
    120
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: ProviderType::default(),
            model: default_model(),
            base_url: None,
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            api_key_env: default_api_key_env(),
            timeout_secs: default_llm_timeout(),
        }
    }
}

/// Agent loop settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentSettings {
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_max_iterations() -> usize {
    AgentConfig::DEFAULT_MAX_ITERATIONS
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

/// Embedding memory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryConfig {
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// Where embedding model files are cached. `None` means `{data_dir}/models`.
    #[serde(default)]
    pub cache_dir: Option<String>,
}

fn default_embedding_model() -> String {
    "all-MiniLM-L6-v2".to_string()
}

fn default_dimension() -> usize {
    DEFAULT_EMBEDDING_DIMENSION
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            embedding_model: default_embedding_model(),
            dimension: default_dimension(),
            cache_dir: None,
        }
    }
}

/// Weather provider settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    #[serde(default = "default_weather_url")]
    pub base_url: String,
    #[serde(default)]
    pub units: TemperatureUnits,
    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

fn default_weather_url() -> String {
    "http://api.openweathermap.org".to_string()
}

fn default_weather_timeout() -> u64 {
    10
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: default_weather_url(),
            units: TemperatureUnits::default(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

/// OpenWeather unit system; decides how temperatures are labelled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnits {
    /// Kelvin.
    Standard,
    /// Celsius.
    #[default]
    Metric,
    /// Fahrenheit.
    Imperial,
}

impl TemperatureUnits {
    /// Value of the `units` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            TemperatureUnits::Standard => "standard",
            TemperatureUnits::Metric => "metric",
            TemperatureUnits::Imperial => "imperial",
        }
    }

    pub fn suffix(self) -> &'static str {
        match self {
            TemperatureUnits::Standard => "K",
            TemperatureUnits::Metric => "°C",
            TemperatureUnits::Imperial => "°F",
        }
    }
}

/// Which travel-data tool backs the agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelProvider {
    /// Placeholder answers; no network access.
    #[default]
    Simulated,
    /// Live search results from SerpApi.
    #[serde(rename = "serpapi")]
    SerpApi,
}

/// Travel-data tool settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelConfig {
    #[serde(default)]
    pub provider: TravelProvider,
    #[serde(default = "default_serpapi_url")]
    pub base_url: String,
    #[serde(default = "default_travel_timeout")]
    pub timeout_secs: u64,
}

fn default_serpapi_url() -> String {
    "https://serpapi.com".to_string()
}

fn default_travel_timeout() -> u64 {
    10
}

impl Default for TravelConfig {
    fn default() -> Self {
        Self {
            provider: TravelProvider::default(),
            base_url: default_serpapi_url(),
            timeout_secs: default_travel_timeout(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Logging settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,
    /// Bridge spans to OpenTelemetry (stdout exporter).
    #[serde(default)]
    pub otel: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.llm.provider, ProviderType::HuggingFace);
        assert_eq!(config.llm.model, "google/flan-t5-base");
        assert_eq!(config.agent.max_iterations, 15);
        assert_eq!(config.memory.dimension, 384);
        assert_eq!(config.travel.provider, TravelProvider::Simulated);
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.weather.units, TemperatureUnits::Metric);
        assert_eq!(config.travel.timeout_secs, 10);
        assert!(config.database.url.is_none());
    }

    #[test]
    fn test_app_config_deserialize_with_values() {
        let toml_str = r#"
[server]
port = 9000

[llm]
provider = "openai_compatible"
model = "gemini-2.0-flash"
base_url = "https://generativelanguage.googleapis.com/v1beta/openai"
api_key_env = "GEMINI_API_KEY"
temperature = 0.2

[agent]
max_iterations = 5

[weather]
units = "imperial"

[travel]
provider = "serpapi"
timeout_secs = 4

[logging]
format = "json"
otel = true
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.llm.provider, ProviderType::OpenAiCompatible);
        assert_eq!(config.llm.api_key_env, "GEMINI_API_KEY");
        assert_eq!(config.llm.max_tokens, 512);
        assert_eq!(config.agent.max_iterations, 5);
        assert_eq!(config.travel.provider, TravelProvider::SerpApi);
        assert_eq!(config.travel.timeout_secs, 4);
        assert_eq!(config.weather.units, TemperatureUnits::Imperial);
        assert_eq!(config.weather.units.suffix(), "°F");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.logging.otel);
    }

    #[test]
    fn test_agent_config_from_sections() {
        let mut config = AppConfig::default();
        config.llm.temperature = 0.3;
        config.agent.max_iterations = 4;
        let agent = config.agent_config();
        assert_eq!(agent.model, "google/flan-t5-base");
        assert!((agent.temperature - 0.3).abs() < f64::EPSILON);
        assert_eq!(agent.max_iterations, 4);
    }
}
