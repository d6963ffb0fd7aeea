use std::{future::Future, net::SocketAddr};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Parse the configured host/port into a socket address
pub fn load_bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    let raw = server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("{raw}: {e}")))
}

/// Router over a fresh in-memory car store
pub fn build_app() -> Router {
    routes::build_router(build_cors(), ServerState::in_memory())
}

/// Public entry: build the app and serve until `shutdown` resolves
pub async fn run<F>(config: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = build_app();

    let addr = load_bind_addr(&config.server)?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|source| StartupError::Bind { addr: addr.to_string(), source })?;
    info!(%addr, "starting car api");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(%addr, "car api stopped");
    Ok(())
}
