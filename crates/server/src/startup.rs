use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ServerConfig};
use service::favorite::MongoFavoriteRepository;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Build the app around an already-connected state.
pub fn app(state: AppState, cfg: &ServerConfig) -> Router {
    routes::build_router(state, build_cors(), &cfg.static_dir)
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(service = "server", event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: connect the store once, build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    common::env::ensure_env(&cfg.server.static_dir).await?;

    let db = models::db::connect(&cfg.database).await?;
    let repo = MongoFavoriteRepository::new(&db, &cfg.database.collection);
    let state = AppState::new(Arc::new(repo));

    let router = app(state, &cfg.server);
    let addr = bind_addr(&cfg.server)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(service = "server", event = "listening", %addr, "server running on port {}", cfg.server.port);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bind_addr_uses_host_and_port() {
        let cfg = ServerConfig { host: "127.0.0.1".into(), port: 3001, ..ServerConfig::default() };
        assert_eq!(bind_addr(&cfg).unwrap(), "127.0.0.1:3001".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn bind_addr_rejects_hostnames() {
        let cfg = ServerConfig { host: "localhost".into(), ..ServerConfig::default() };
        assert!(bind_addr(&cfg).is_err());
    }
}
