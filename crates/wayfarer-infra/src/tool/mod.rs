//! Concrete agent tools and the registry the server starts with.

pub mod travel;
pub mod weather;

use tracing::{info, warn};

use wayfarer_core::tool::box_tool::BoxTool;
use wayfarer_core::tool::registry::ToolRegistry;
use wayfarer_types::config::{AppConfig, TravelProvider};

use crate::secret::Secrets;

use self::travel::{SerpApiTool, SimulatedTravelTool};
use self::weather::OpenWeatherTool;

/// Build the weather and travel tools from config and secrets.
///
/// Selecting the SerpApi travel provider without a `SERPAPI_KEY` falls back
/// to the simulated tool with a warning.
pub fn build_tool_registry(
    config: &AppConfig,
    secrets: &Secrets,
) -> Result<ToolRegistry, reqwest::Error> {
    if secrets.openweather_key.is_none() {
        warn!("OPENWEATHER_KEY is not set; weather lookups will report as unavailable");
    }
    let weather = OpenWeatherTool::new(&config.weather, secrets.openweather_key.clone())?;

    let travel = match (&config.travel.provider, &secrets.serpapi_key) {
        (TravelProvider::SerpApi, Some(key)) => {
            info!("travel data backed by SerpApi");
            BoxTool::new(SerpApiTool::new(&config.travel, key.clone())?)
        }
        (TravelProvider::SerpApi, None) => {
            warn!("travel provider is serpapi but SERPAPI_KEY is not set; using simulated data");
            BoxTool::new(SimulatedTravelTool)
        }
        (TravelProvider::Simulated, _) => BoxTool::new(SimulatedTravelTool),
    };

    Ok(ToolRegistry::new().with(BoxTool::new(weather)).with(travel))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_registry_has_both_tools() {
        let registry = build_tool_registry(&AppConfig::default(), &Secrets::default()).unwrap();
        assert_eq!(registry.names(), vec!["OpenWeather", "SerpApi"]);
    }

    #[tokio::test]
    async fn test_serpapi_without_key_falls_back_to_simulated() {
        let mut config = AppConfig::default();
        config.travel.provider = TravelProvider::SerpApi;
        let registry = build_tool_registry(&config, &Secrets::default()).unwrap();
        let tool = registry.get("serpapi").unwrap();
        assert_eq!(tool.invoke("Rome").await, "Simulated travel data for 'Rome'.");
    }
}
