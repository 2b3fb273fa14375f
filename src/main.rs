// Main entry point - Dependency injection and server setup
mod domain;
mod application;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use crate::application::auth_service::AuthService;
use crate::application::dashboard_service::Dashboard;
use crate::application::fleet_service::FleetService;
use crate::application::refresh_loop::Jitter;
use crate::application::session::DashboardSession;
use crate::application::telemetry_store::SharedStore;
use crate::application::translations::TranslationTable;
use crate::infrastructure::api_client::ApiClient;
use crate::infrastructure::config::{load_app_config, AppConfig};
use crate::infrastructure::memory_repository::InMemoryFleetRepository;
use crate::infrastructure::seed::seed_store;
use crate::infrastructure::snapshot_view::{RecordingChartRenderer, SnapshotView};
use crate::infrastructure::token_store::FileTokenStore;
use crate::presentation::app_state::AppState;
use crate::presentation::build_router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    let config = load_app_config()?;

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        None | Some("serve") => serve(config).await,
        Some(command) => run_client(&config, command, &args[1..]).await,
    }
}

async fn serve(config: AppConfig) -> anyhow::Result<()> {
    // Shared state (application layer)
    let store = SharedStore::new(seed_store());
    let translations = Arc::new(TranslationTable::builtin()?);
    tracing::info!("Loaded translation table with {} keys", translations.keys().len());

    let repository = Arc::new(InMemoryFleetRepository::new(store.clone()));
    let fleet_service = FleetService::new(repository);
    let auth_service = AuthService::new(
        &config.auth.username,
        &config.auth.password,
        &config.auth.role,
        config.token_ttl()?,
    );

    let dashboard = Dashboard::new(
        store,
        translations,
        SnapshotView::new(),
        RecordingChartRenderer::default(),
        Jitter::from_seed_option(config.refresh.seed),
    );
    let session = DashboardSession::start(dashboard, &config.dashboard.language, config.load_delay());

    let cancel = CancellationToken::new();
    let refresh = session.spawn_refresh_loop(config.refresh_period(), cancel.clone());
    tracing::info!("Registered background refresh every {:?}", config.refresh_period());

    // Create application state
    let state = Arc::new(AppState {
        fleet_service,
        auth_service,
        dashboard: session,
    });

    // Build router (presentation layer)
    let router = build_router(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid server.bind address {:?}", config.server.bind))?;
    tracing::info!("Starting smartswap service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
            }
        })
        .await?;

    cancel.cancel();
    if let Err(e) = refresh.await {
        tracing::warn!("Refresh loop ended abnormally: {}", e);
    }

    Ok(())
}

const USAGE: &str = "Usage: smartswap [serve | status | login <user> <password> | logout | refresh | me \
| batteries | battery <id> | stations | station <id> | route <origin> <destination> | materials | ml \
| summary | health | weather <location> | dashboard | navigate <section> | language <code> | resize]";

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Small command-line client against a running server.
async fn run_client(config: &AppConfig, command: &str, args: &[String]) -> anyhow::Result<()> {
    let tokens = Arc::new(FileTokenStore::new(&config.client.token_dir));
    tracing::debug!("Using token file {}", tokens.path().display());
    let client = ApiClient::new(config.client.base_url.clone(), tokens);

    match (command, args) {
        ("status", []) => {
            let state = if client.is_authenticated()? { "logged in" } else { "logged out" };
            println!("{} ({})", state, config.client.base_url);
        }
        ("login", [username, password]) => {
            client.login(username, password).await?;
            println!("Logged in as {}", username);
        }
        ("logout", []) => {
            client.logout().await?;
            println!("Logged out");
        }
        ("refresh", []) => {
            client.refresh().await?;
            println!("Token refreshed");
        }
        ("me", []) => print_json(&client.me().await?)?,
        ("batteries", []) => print_json(&client.batteries().await?)?,
        ("battery", [id]) => print_json(&client.battery(id).await?)?,
        ("stations", []) => print_json(&client.stations().await?)?,
        ("station", [id]) => print_json(&client.station(id).await?)?,
        ("route", [origin, destination]) => print_json(&client.optimize_route(origin, destination).await?)?,
        ("materials", []) => print_json(&client.circular_economy().await?)?,
        ("ml", []) => print_json(&client.ml_performance().await?)?,
        ("summary", []) => print_json(&client.fleet_summary().await?)?,
        ("health", []) => print_json(&client.battery_health_summary().await?)?,
        ("weather", [location]) => print_json(&client.weather(location).await?)?,
        ("dashboard", []) => print_json(&client.dashboard().await?)?,
        ("navigate", [section]) => print_json(&client.navigate(section).await?)?,
        ("language", [code]) => print_json(&client.set_language(code).await?)?,
        ("resize", []) => print_json(&client.resize_dashboard().await?)?,
        _ => anyhow::bail!("Unknown command {:?}. {}", command, USAGE),
    }

    Ok(())
}
