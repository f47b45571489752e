//! Travel-data tools: a simulated placeholder and a SerpApi-backed search.
//!
//! Both register under the name `SerpApi` so the prompt and the model's
//! tool choice are the same whichever one is configured.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::debug;

use wayfarer_core::tool::Tool;
use wayfarer_types::config::TravelConfig;

const TOOL_NAME: &str = "SerpApi";
const TOOL_DESCRIPTION: &str =
    "Fetch travel data (flights/hotels) using SerpApi for a given query.";

/// Results included in the summary.
const MAX_RESULTS: usize = 3;

/// Answers every query with a fixed placeholder. Makes no network calls.
#[derive(Debug, Default)]
pub struct SimulatedTravelTool;

impl Tool for SimulatedTravelTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        TOOL_DESCRIPTION
    }

    async fn invoke(&self, input: &str) -> String {
        format!("Simulated travel data for '{input}'.")
    }
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Debug, Deserialize)]
struct OrganicResult {
    title: String,
    #[serde(default)]
    snippet: Option<String>,
    #[serde(default)]
    link: Option<String>,
}

/// Google search through SerpApi, summarised to the top few results.
pub struct SerpApiTool {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
}

impl SerpApiTool {
    pub fn new(config: &TravelConfig, api_key: SecretString) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn search(&self, query: &str) -> Result<String, String> {
        let response = self
            .client
            .get(format!("{}/search.json", self.base_url))
            .query(&[
                ("engine", "google"),
                ("q", query),
                ("api_key", self.api_key.expose_secret()),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("HTTP {status}"));
        }

        let body: SearchResponse = response.json().await.map_err(|e| e.to_string())?;
        Ok(summarize(query, &body.organic_results))
    }
}

fn summarize(query: &str, results: &[OrganicResult]) -> String {
    if results.is_empty() {
        return format!("No travel data found for '{query}'.");
    }

    let mut out = format!("Travel data for '{query}':");
    for (i, r) in results.iter().take(MAX_RESULTS).enumerate() {
        out.push_str(&format!("\n{}. {}", i + 1, r.title));
        if let Some(ref snippet) = r.snippet {
            out.push_str(&format!(" - {snippet}"));
        }
        if let Some(ref link) = r.link {
            out.push_str(&format!(" ({link})"));
        }
    }
    out
}

impl Tool for SerpApiTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        TOOL_DESCRIPTION
    }

    async fn invoke(&self, input: &str) -> String {
        match self.search(input).await {
            Ok(summary) => summary,
            Err(reason) => {
                debug!(query = input, %reason, "travel search failed");
                format!("Unable to fetch travel data for {input}.")
            }
        }
    }
}
