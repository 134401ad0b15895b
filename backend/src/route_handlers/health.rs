use axum::Json;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct HealthCheckResponse {
  pub code: u16,
  pub status: &'static str,
}

pub async fn health_handler() -> Json<HealthCheckResponse> {
  Json(HealthCheckResponse { code: 200, status: "ok" })
}
