// Framework bootstrap for the user service.

use crate::frameworks::config;
use crate::interface_adapters::routes::app;
use crate::interface_adapters::state::AppState;
use common::{BodyPolicy, ExceptionFilter};
use std::io::Result;
use std::net::SocketAddr;

fn init_runtime() {
    // Load .env locally; safe to ignore when not present.
    let _ = dotenvy::dotenv();
    common::telemetry::init_tracing("user_service");
}

pub async fn run(
    listener: tokio::net::TcpListener,
    session_ttl_seconds: u64,
    filter: ExceptionFilter,
) -> Result<()> {
    let address = listener.local_addr()?;
    let policy = filter.policy();
    let app = app(AppState::new(session_ttl_seconds), filter);

    tracing::info!(%address, ?policy, session_ttl_seconds, "listening");

    axum::serve(listener, app).await.inspect_err(|e| {
        tracing::error!(error = %e, "server error");
    })
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();

    let address = SocketAddr::from(([127, 0, 0, 1], config::http_port()));

    let listener = tokio::net::TcpListener::bind(address)
        .await
        .inspect_err(|e| {
            tracing::error!(%address, error = %e, "failed to bind");
        })?;

    run(
        listener,
        config::session_ttl_seconds(),
        ExceptionFilter::new(BodyPolicy::from_env()),
    )
    .await
}
