mod config;
mod dataset;
mod midwares;
mod route_handlers;
mod view;

use anyhow::Context;
use axum::http::{HeaderValue, Method};
use tokio::net::TcpListener;
use tower_http::{cors::{Any, CorsLayer}, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Config;
use dataset::loader::{source_for, DatasetCache};
use midwares::app_state::AppState;
use route_handlers::api_router;

fn init_tracing() {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .init();
}

fn cors_layer(origin: Option<&str>) -> anyhow::Result<CorsLayer> {
  let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]);
  Ok(match origin {
    Some(origin) => layer.allow_origin(origin.parse::<HeaderValue>().context("CORS_ORIGIN is not a valid header value")?),
    None => layer.allow_origin(Any),
  })
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for Ctrl-C");
    std::future::pending::<()>().await;
  }
  info!("received Ctrl-C, shutting down");
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  init_tracing();
  let config = Config::from_env()?;

  let source = source_for(&config.data_url, reqwest::Client::new());
  let state = AppState::new(DatasetCache::new(source));

  let app = api_router(state)
    .layer(cors_layer(config.cors_origin.as_deref())?)
    .layer(TraceLayer::new_for_http());

  let listener = TcpListener::bind(config.bind_addr).await
    .with_context(|| format!("failed to bind {}", config.bind_addr))?;
  info!(addr = %config.bind_addr, data_url = %config.data_url, "dashboard backend listening");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}
