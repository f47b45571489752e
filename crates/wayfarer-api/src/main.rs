//! Wayfarer CLI and REST API entry point.
//!
//! Binary name: `wayfarer`
//!
//! `serve` loads configuration and secrets, wires the services, and starts
//! the HTTP server. The remaining commands are clients of that server.

mod cli;
mod http;
mod state;

use std::path::{Path, PathBuf};

use anyhow::anyhow;
use clap::Parser;
use tracing::{error, info, warn};

use wayfarer_infra::config::{data_dir, default_config_path, load_config};
use wayfarer_infra::secret::Secrets;
use wayfarer_observe::tracing_setup::{filter_for_verbosity, init_tracing, shutdown_tracing};
use wayfarer_types::config::{AppConfig, LogFormat};

use cli::client::ApiClient;
use cli::{Cli, ClientCommand, Commands, ProfileAction};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let filter = filter_for_verbosity(cli.verbose, cli.quiet);
    let data_dir = data_dir();

    match cli.command {
        Commands::Serve { host, port, config } => {
            serve(filter, &data_dir, host, port, config).await?;
        }

        Commands::Client(command) => {
            init_tracing(filter, LogFormat::Text, false).map_err(|e| anyhow!(e))?;
            run_client_command(command, &cli.api_url, &data_dir, cli.json).await?;
        }
    }

    Ok(())
}

async fn run_client_command(
    command: ClientCommand,
    api_url: &str,
    data_dir: &Path,
    json: bool,
) -> anyhow::Result<()> {
    match command {
        ClientCommand::Signup { email, full_name } => {
            cli::account::signup(api_url, &email, full_name.as_deref(), json).await?;
        }

        ClientCommand::Login { email } => {
            cli::account::login(api_url, data_dir, &email, json).await?;
        }

        ClientCommand::Logout => {
            cli::account::logout(data_dir, json).await?;
        }

        ClientCommand::Profile { action } => {
            let client = authed_client(api_url, data_dir).await?;
            match action {
                ProfileAction::Show => cli::profile::show(&client, json).await?,
                ProfileAction::Update {
                    full_name,
                    preferences,
                } => cli::profile::update(&client, full_name, preferences, json).await?,
            }
        }

        ClientCommand::Chat { query } => {
            let client = authed_client(api_url, data_dir).await?;
            cli::chat::run(&client, query, json).await?;
        }
    }

    Ok(())
}

/// Client carrying the saved session token, if any.
async fn authed_client(api_url: &str, data_dir: &Path) -> anyhow::Result<ApiClient> {
    let token = cli::session::load(data_dir).await.map(|s| s.access_token);
    Ok(ApiClient::new(api_url, token)?)
}

async fn serve(
    filter: &str,
    data_dir: &Path,
    host: Option<String>,
    port: Option<u16>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config_path = config_path.unwrap_or_else(|| default_config_path(data_dir));
    let (mut config, config_problem) = match load_config(&config_path).await {
        Ok(config) => (config, None),
        Err(err) => (AppConfig::default(), Some(err)),
    };

    init_tracing(filter, config.logging.format, config.logging.otel).map_err(|e| anyhow!(e))?;
    if let Some(err) = config_problem {
        warn!("{err}, using defaults");
    }

    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let secrets = Secrets::from_env(&config);
    let state = AppState::init(&config, data_dir, secrets).await?;

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, data_dir = %data_dir.display(), "Wayfarer API listening");

    println!(
        "  {} Wayfarer API listening on {}",
        console::style("⚡").bold(),
        console::style(format!("http://{addr}")).cyan()
    );
    println!("  {}", console::style("Press Ctrl+C to stop").dim());

    let router = http::router::build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    shutdown_tracing();
    println!("\n  Server stopped.");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
///
/// If a handler cannot be installed, that source never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
