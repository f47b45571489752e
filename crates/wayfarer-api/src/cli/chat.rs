//! Chat CLI command: one-shot or interactive.

use std::time::Duration;

use anyhow::Result;
use console::style;
use dialoguer::Input;
use indicatif::{ProgressBar, ProgressStyle};

use super::client::{ApiClient, ClientError};

const EXIT_WORDS: [&str; 3] = ["exit", "quit", "/quit"];

/// Run a single query, or loop reading queries until `exit` / Ctrl-D.
pub async fn run(client: &ApiClient, query: Option<String>, json: bool) -> Result<()> {
    if let Some(query) = query {
        let response = ask(client, &query, json).await?;
        if json {
            println!("{}", serde_json::json!({"query": query, "response": response}));
        } else {
            print_turn(&query, &response);
        }
        return Ok(());
    }

    println!(
        "  {} Ask about a destination. Type {} to leave.",
        style("✈").cyan().bold(),
        style("exit").yellow()
    );

    let mut history: Vec<(String, String)> = Vec::new();
    loop {
        let Ok(query) = Input::<String>::new()
            .with_prompt("You")
            .allow_empty(true)
            .interact_text()
        else {
            break;
        };
        let query = query.trim().to_string();
        if EXIT_WORDS.contains(&query.to_lowercase().as_str()) {
            break;
        }

        match ask(client, &query, json).await {
            Ok(response) => {
                println!("{} {}", style("Assistant:").green().bold(), response);
                println!();
                history.push((query, response));
            }
            // Empty input and per-turn server errors keep the loop alive.
            Err(err @ (ClientError::Invalid(_) | ClientError::Api { .. })) => {
                eprintln!("  {} {err}", style("✗").red().bold());
            }
            Err(err) => return Err(err.into()),
        }
    }

    if json {
        let turns: Vec<_> = history
            .iter()
            .map(|(q, r)| serde_json::json!({"query": q, "response": r}))
            .collect();
        println!("{}", serde_json::to_string_pretty(&turns)?);
    }
    Ok(())
}

async fn ask(client: &ApiClient, query: &str, json: bool) -> Result<String, ClientError> {
    let spinner = (!json).then(|| {
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message("Planning...");
        spinner.enable_steady_tick(Duration::from_millis(80));
        spinner
    });

    let result = client.chat(query).await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }
    result
}

fn print_turn(query: &str, response: &str) {
    println!("{} {}", style("You:").cyan().bold(), query);
    println!("{} {}", style("Assistant:").green().bold(), response);
}
