// Framework bootstrap for the web client.

use crate::frameworks::config::{self, Settings};
use crate::interface_adapters::clients::{HairSwapClient, UserServiceClient};
use crate::interface_adapters::routes;
use crate::interface_adapters::state::AppState;
use common::ExceptionFilter;
use std::io::{Error, Result};
use std::net::SocketAddr;
use std::sync::Arc;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    common::telemetry::init_tracing("web_client");
}

fn build_state(settings: &Settings) -> Result<AppState> {
    let identity = UserServiceClient::new(&settings.api_base_url, settings.auth_verify_timeout)
        .map_err(Error::other)?;
    tracing::debug!(api_base_url = %settings.api_base_url, "identity client configured.");

    let hair_swapper = HairSwapClient::new(&settings.hair_swap_url, settings.hair_swap_timeout)
        .map_err(Error::other)?;
    tracing::debug!(hair_swap_url = %settings.hair_swap_url, "hair swap client configured.");

    Ok(AppState {
        identity: Arc::new(identity),
        hair_swapper: Arc::new(hair_swapper),
        auth_verify_timeout: settings.auth_verify_timeout,
    })
}

pub async fn run(listener: tokio::net::TcpListener, settings: Settings) -> Result<()> {
    let address = listener.local_addr()?;
    let state = build_state(&settings)?;

    // Start the web server with the pages and the gate wired up.
    let app = routes::app(state, ExceptionFilter::new(settings.body_policy));

    tracing::info!(%address, "listening");

    // Serve app and report errors rather than panicking.
    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    // Bind TCP listener with error handling.
    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(listener, Settings::from_env()).await
}
