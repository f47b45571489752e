//! Environment variable secrets.
//!
//! Key resolution checks the variable name directly. Missing, empty, and
//! non-Unicode values are all treated as absent.

use secrecy::SecretString;

use wayfarer_types::config::AppConfig;

/// Token signing key. Required to serve the API.
pub const SECRET_KEY_ENV: &str = "SECRET_KEY";
/// OpenWeather API key.
pub const OPENWEATHER_KEY_ENV: &str = "OPENWEATHER_KEY";
/// SerpApi key, used only by the live travel-data tool.
pub const SERPAPI_KEY_ENV: &str = "SERPAPI_KEY";

/// Read one secret from the environment.
pub fn env_secret(name: &str) -> Option<SecretString> {
    match std::env::var(name) {
        Ok(val) if !val.trim().is_empty() => Some(SecretString::from(val)),
        Ok(_) => None,
        Err(std::env::VarError::NotPresent) => None,
        // Secrets must be valid strings; treat as not found.
        Err(std::env::VarError::NotUnicode(_)) => None,
    }
}

/// Every credential the server may need, resolved once at startup.
#[derive(Debug, Default)]
pub struct Secrets {
    pub secret_key: Option<SecretString>,
    pub openweather_key: Option<SecretString>,
    pub llm_api_key: Option<SecretString>,
    pub serpapi_key: Option<SecretString>,
}

impl Secrets {
    /// Load secrets; the LLM key variable name comes from `[llm] api_key_env`.
    pub fn from_env(config: &AppConfig) -> Self {
        Self {
            secret_key: env_secret(SECRET_KEY_ENV),
            openweather_key: env_secret(OPENWEATHER_KEY_ENV),
            llm_api_key: env_secret(&config.llm.api_key_env),
            serpapi_key: env_secret(SERPAPI_KEY_ENV),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    #[test]
    fn test_missing_var_is_none() {
        assert!(env_secret("WAYFARER_TEST_DEFINITELY_UNSET_VAR").is_none());
    }

    #[test]
    fn test_llm_key_uses_configured_name() {
        let mut config = AppConfig::default();
        config.llm.api_key_env = "PATH".to_string();
        let secrets = Secrets::from_env(&config);
        let path = std::env::var("PATH").unwrap();
        assert_eq!(secrets.llm_api_key.unwrap().expose_secret(), path);
    }

    #[test]
    fn test_debug_does_not_leak() {
        let secrets = Secrets {
            secret_key: Some(SecretString::from("hunter2".to_string())),
            ..Default::default()
        };
        assert!(!format!("{secrets:?}").contains("hunter2"));
    }
}
