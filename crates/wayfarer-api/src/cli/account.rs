//! Account CLI commands: signup, login, logout.

use std::path::Path;

use anyhow::Result;
use console::style;
use dialoguer::Password;

use super::client::ApiClient;
use super::session::{self, Session};

fn prompt_password(confirm: bool) -> Result<String> {
    let mut prompt = Password::new().with_prompt("Password");
    if confirm {
        prompt = prompt.with_confirmation("Confirm password", "Passwords do not match");
    }
    Ok(prompt.interact()?)
}

/// Create an account with a hidden password prompt.
///
/// # Examples
///
/// ```bash
/// wayfarer signup --email a@x.com --full-name "Ada"
/// ```
pub async fn signup(api_url: &str, email: &str, full_name: Option<&str>, json: bool) -> Result<()> {
    let password = prompt_password(true)?;
    let client = ApiClient::new(api_url, None)?;
    let profile = client.signup(email, &password, full_name).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&profile)?);
    } else {
        println!(
            "  {} Account created for {}. Log in with: {}",
            style("✓").green().bold(),
            style(&profile.email).cyan(),
            style(format!("wayfarer login --email {}", profile.email)).yellow()
        );
    }
    Ok(())
}

/// Log in and save the token to `{data_dir}/session.json`.
pub async fn login(api_url: &str, data_dir: &Path, email: &str, json: bool) -> Result<()> {
    let password = prompt_password(false)?;
    let client = ApiClient::new(api_url, None)?;
    let token = client.login(email, &password).await?;

    session::save(
        data_dir,
        &Session {
            email: email.to_string(),
            access_token: token.access_token,
        },
    )
    .await?;

    if json {
        println!("{}", serde_json::json!({"logged_in": true, "email": email}));
    } else {
        println!(
            "  {} Logged in as {}",
            style("✓").green().bold(),
            style(email).cyan()
        );
    }
    Ok(())
}

pub async fn logout(data_dir: &Path, json: bool) -> Result<()> {
    let existed = session::clear(data_dir).await?;
    if json {
        println!("{}", serde_json::json!({"logged_out": existed}));
    } else if existed {
        println!("  {} Logged out", style("✓").green().bold());
    } else {
        println!("  {} No saved session", style("i").blue().bold());
    }
    Ok(())
}
