//! Profile CLI commands: show, update.

use anyhow::Result;
use comfy_table::{Cell, Color, ContentArrangement, Table, presets};
use console::style;

use wayfarer_types::user::UserProfile;

use super::client::{ApiClient, parse_preferences};

pub async fn show(client: &ApiClient, json: bool) -> Result<()> {
    let profile = client.profile().await?;
    print_profile(&profile, json)
}

/// Update the profile. The server replaces both fields wholesale, so any
/// field not given on the command line is resent with its current value.
pub async fn update(
    client: &ApiClient,
    full_name: Option<String>,
    preferences: Option<String>,
    json: bool,
) -> Result<()> {
    // Validate before touching the network.
    let preferences = preferences.as_deref().map(parse_preferences).transpose()?;

    let current = client.profile().await?;
    let full_name = full_name.or(current.full_name);
    let preferences = preferences.unwrap_or(current.travel_preferences);

    let updated = client
        .update_profile(full_name.as_deref(), &preferences)
        .await?;

    if !json {
        println!("  {} Profile updated", style("✓").green().bold());
    }
    print_profile(&updated, json)
}

fn print_profile(profile: &UserProfile, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(profile)?);
        return Ok(());
    }

    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Email").fg(Color::White),
        Cell::new(&profile.email).fg(Color::Cyan),
    ]);
    table.add_row(vec![
        Cell::new("Full name").fg(Color::White),
        Cell::new(profile.full_name.as_deref().unwrap_or("-")),
    ]);
    let preferences = if profile.travel_preferences.is_empty() {
        "-".to_string()
    } else {
        serde_json::to_string_pretty(&profile.travel_preferences)?
    };
    table.add_row(vec![
        Cell::new("Preferences").fg(Color::White),
        Cell::new(preferences).fg(Color::DarkGrey),
    ]);

    println!();
    println!("{table}");
    println!();
    Ok(())
}
