//! OpenWeather current-conditions tool.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, warn};

use wayfarer_core::tool::Tool;
use wayfarer_types::config::{TemperatureUnits, WeatherConfig};

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    weather: Vec<WeatherCondition>,
    main: MainReadings,
}

#[derive(Debug, Deserialize)]
struct WeatherCondition {
    description: String,
}

#[derive(Debug, Deserialize)]
struct MainReadings {
    /// Kept as a JSON number so `21` and `21.5` print the way the API sent them.
    temp: serde_json::Number,
}

/// Looks up current weather for a free-text location.
///
/// Every failure (missing key, transport error, non-200, unexpected body)
/// becomes the same "unable to fetch" sentence so the agent can carry on.
pub struct OpenWeatherTool {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    units: TemperatureUnits,
}

impl OpenWeatherTool {
    pub fn new(config: &WeatherConfig, api_key: Option<SecretString>) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            units: config.units,
        })
    }

    async fn fetch(&self, location: &str, api_key: &SecretString) -> Result<String, String> {
        let response = self
            .client
            .get(format!("{}/data/2.5/weather", self.base_url))
            .query(&[
                ("q", location),
                ("appid", api_key.expose_secret()),
                ("units", self.units.as_str()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if status != reqwest::StatusCode::OK {
            return Err(format!("HTTP {status}"));
        }

        let body: WeatherResponse = response.json().await.map_err(|e| e.to_string())?;
        let description = body
            .weather
            .into_iter()
            .next()
            .map(|w| w.description)
            .ok_or_else(|| "no weather conditions in response".to_string())?;

        Ok(format!(
            "In {location}, the weather is '{description}' with a temperature of {}{}.",
            body.main.temp,
            self.units.suffix()
        ))
    }
}

impl Tool for OpenWeatherTool {
    fn name(&self) -> &str {
        "OpenWeather"
    }

    fn description(&self) -> &str {
        "Fetch current weather information for a given location."
    }

    async fn invoke(&self, input: &str) -> String {
        let Some(ref api_key) = self.api_key else {
            warn!("OpenWeather called without an API key");
            return unavailable(input);
        };

        match self.fetch(input, api_key).await {
            Ok(report) => report,
            Err(reason) => {
                debug!(location = input, %reason, "weather lookup failed");
                unavailable(input)
            }
        }
    }
}

fn unavailable(location: &str) -> String {
    format!("Unable to fetch weather data for {location}.")
}
