//! CLI command definitions and dispatch for the `wayfarer` binary.
//!
//! `serve` runs the API in-process; every other command talks to a running
//! server over HTTP through [`client::ApiClient`].

pub mod account;
pub mod chat;
pub mod client;
pub mod profile;
pub mod session;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use client::DEFAULT_API_URL;

/// Personalized travel recommendations from a tool-using agent.
#[derive(Parser)]
#[command(name = "wayfarer", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Base URL of the Wayfarer API.
    #[arg(long, global = true, env = "WAYFARER_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the REST API server.
    Serve {
        /// Bind address (overrides `[server] host`).
        #[arg(long)]
        host: Option<String>,

        /// Port (overrides `[server] port`).
        #[arg(long)]
        port: Option<u16>,

        /// Path to config.toml (default: `{data_dir}/config.toml`).
        #[arg(long)]
        config: Option<PathBuf>,
    },

    #[command(flatten)]
    Client(ClientCommand),
}

/// Commands that talk to a running server.
#[derive(Subcommand)]
pub enum ClientCommand {
    /// Create an account. The password is prompted for.
    Signup {
        #[arg(long)]
        email: String,

        #[arg(long)]
        full_name: Option<String>,
    },

    /// Log in and remember the access token.
    Login {
        #[arg(long)]
        email: String,
    },

    /// Forget the saved access token.
    Logout,

    /// Show or edit your travel profile.
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// Ask for a travel recommendation (interactive without --query).
    Chat {
        /// Send a single query and exit.
        #[arg(short, long)]
        query: Option<String>,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// Print the current profile.
    Show,

    /// Update name and/or preferences. Omitted fields keep their value.
    Update {
        #[arg(long)]
        full_name: Option<String>,

        /// Preferences as a JSON object, e.g. '{"climate":"warm"}'.
        #[arg(long)]
        preferences: Option<String>,
    },
}
