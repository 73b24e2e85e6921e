//! Terminal client for the EventHub backend.

#![allow(clippy::print_stdout, reason = "CLI tool outputs to stdout")]

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use eventhub_client::{
    EventHubClient, FileSessionStore, GatewayConfig, SessionEvent, SessionStore,
};
use eventhub_types::{LoginRequest, RegisterRequest};

mod cli;
mod commands;
mod output;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;

    let mut config = GatewayConfig::from_env();
    if let Some(base_url) = cli.base_url.clone() {
        config = config.with_base_url(base_url);
    }
    if let Some(timeout_ms) = cli.timeout_ms {
        config = config.with_timeout_ms(timeout_ms);
    }

    let session_file = match cli.session_file.clone() {
        Some(path) => path,
        None => FileSessionStore::default_path()?,
    };
    let store: Arc<dyn SessionStore> = Arc::new(FileSessionStore::open(&session_file));
    let client = EventHubClient::new(&config, store).context("Invalid client configuration")?;
    let mut signals = client.subscribe();

    tracing::debug!("Using API at {}", client.gateway().api_url());

    let outcome = run(&client, cli, &session_file).await;
    report_session_events(&mut signals);
    outcome
}

async fn run(client: &EventHubClient, cli: Cli, session_file: &std::path::Path) -> Result<()> {
    let json = cli.json;
    match cli.command {
        Commands::Register { first_name, last_name, email, password } => {
            let request = RegisterRequest { first_name, last_name, email, password };
            commands::register(client, request, json).await
        },
        Commands::Login { email, password } => {
            commands::login(client, LoginRequest { email, password }, json).await
        },
        Commands::Logout => {
            commands::logout(client);
            Ok(())
        },
        Commands::Profile => commands::profile(client, json).await,
        Commands::Status => commands::status(client, session_file, json),
        Commands::Events(cmd) => commands::handle_event_command(client, cmd, json).await,
        Commands::Bookings(cmd) => commands::handle_booking_command(client, cmd, json).await,
        Commands::Users(cmd) => commands::handle_user_command(client, cmd, json).await,
    }
}

/// A terminal has no login page to redirect to, so an expired session is
/// reported once after the command finishes.
fn report_session_events(signals: &mut broadcast::Receiver<SessionEvent>) {
    while let Ok(event) = signals.try_recv() {
        if let SessionEvent::Expired { .. } = event {
            eprintln!(
                "{}",
                "Session expired. Run `eventhub login` to sign in again.".yellow()
            );
            break;
        }
    }
}
