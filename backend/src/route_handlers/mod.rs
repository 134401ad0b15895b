pub mod dashboard;
pub mod health;

use axum::{routing::{get, post}, Router};

use crate::midwares::app_state::AppState;
use dashboard::{clear_cache_handler, dashboard_handler};
use health::health_handler;

pub fn api_router(state: AppState) -> Router {
  Router::new()
    .route("/api/dashboard", get(dashboard_handler))
    .route("/api/cache/clear", post(clear_cache_handler))
    .route("/health", get(health_handler))
    .with_state(state)
}
