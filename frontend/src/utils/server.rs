use std::fmt;
use serde::Deserialize;

pub const DASHBOARD_URL: &str = env!("DASHBOARD_URL");

pub const TOP_N_MIN: usize = 10;
pub const TOP_N_MAX: usize = 1_000;
pub const TOP_N_DEFAULT: usize = 100;

/* Server Responses */
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DatasetSummary {
  pub loaded_rows: usize,
  pub retained_rows: usize,
  pub dropped_rows: usize,
  pub market_cap_median: f64,
  pub market_cap_iqr: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metric {
  pub label: String,
  pub value: f64,
  pub display: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Metrics {
  pub count: Metric,
  pub mean_price: Metric,
  pub mean_market_cap: Metric,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BarChart {
  pub title: String,
  pub x_label: String,
  pub y_label: String,
  pub names: Vec<String>,
  pub market_caps: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScatterPoint {
  pub name: String,
  pub market_cap: f64,
  pub current_price: f64,
  pub total_volume: f64,
  pub price_change_percentage_24h: f64,
  pub marker_size: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ScatterChart {
  pub title: String,
  pub x_label: String,
  pub y_label: String,
  pub color_label: String,
  pub points: Vec<ScatterPoint>,
  pub color_min: f64,
  pub color_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct HistogramBin {
  pub lower: f64,
  pub upper: f64,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Histogram {
  pub title: String,
  pub x_label: String,
  pub y_label: String,
  pub bins: Vec<HistogramBin>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TableRow {
  pub name: String,
  pub symbol: String,
  pub current_price: f64,
  pub market_cap: f64,
  pub total_volume: f64,
  pub price_change_percentage_24h: f64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ViewModel {
  pub top_n: usize,
  pub summary: DatasetSummary,
  pub metrics: Metrics,
  pub bar: BarChart,
  pub scatter: ScatterChart,
  pub histogram: Histogram,
  pub table: Vec<TableRow>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
  error: String,
  code: u16,
}

// App Errors
#[derive(Debug, Clone, PartialEq)]
pub enum AppError {
  ReqwestError(String),
  ServerError { code: u16, message: String },
  DeserializeError(String),
}

impl std::error::Error for AppError {}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      AppError::ReqwestError(msg) => write!(f, "Could not reach the dashboard server: {}", msg),
      AppError::ServerError { code, message } => write!(f, "Server error ({}): {}", code, message),
      AppError::DeserializeError(msg) => write!(f, "Deserialize error: {}", msg),
    }
  }
}

pub fn clamp_top_n(n: usize) -> usize {
  n.clamp(TOP_N_MIN, TOP_N_MAX)
}

pub async fn fetch_dashboard(client: &reqwest::Client, top_n: usize) -> Result<ViewModel, AppError> {
  let url = format!("{}?top_n={}", DASHBOARD_URL, clamp_top_n(top_n));
  let response = client.get(&url)
    .send()
    .await
    .map_err(|e| AppError::ReqwestError(e.to_string()))?;

  let status = response.status();
  if !status.is_success() {
    // error bodies are `{error, code}`; fall back to the status line
    return Err(match response.json::<ErrorResponse>().await {
      Ok(body) => AppError::ServerError { code: body.code, message: body.error },
      Err(_) => AppError::ServerError { code: status.as_u16(), message: status.to_string() },
    });
  }

  response.json::<ViewModel>()
    .await
    .map_err(|e| AppError::DeserializeError(e.to_string()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn clamps_into_slider_range() {
    assert_eq!(clamp_top_n(0), TOP_N_MIN);
    assert_eq!(clamp_top_n(250), 250);
    assert_eq!(clamp_top_n(5_000), TOP_N_MAX);
  }

  #[test]
  fn decodes_backend_error_body() {
    let body: ErrorResponse = serde_json::from_str(r#"{"error":"Bad request: top_n","code":400}"#).expect("valid body");
    assert_eq!(body.code, 400);
    assert!(body.error.contains("top_n"));
  }
}
