use std::fmt;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use serde_json::json;

use crate::dataset::{loader::DatasetCache, parser::ParseError};

/// Shared router state. Cheap to clone; the cache is the only cross-request resource.
#[derive(Clone)]
pub struct AppState {
  pub cache: DatasetCache,
}

impl AppState {
  pub fn new(cache: DatasetCache) -> Self {
    Self { cache }
  }
}

#[derive(Debug, Serialize, Clone)]
pub enum AppError {
  FetchError(String),
  MissingColumns(Vec<String>),
  MalformedData(String),
  EmptyDataset(String),
  BadRequest(String),
  InternalError(String),
}

impl fmt::Display for AppError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::FetchError(msg) => write!(f, "Dataset fetch failed: {}", msg),
      Self::MissingColumns(cols) => write!(f, "Dataset is missing required columns: {}", cols.join(", ")),
      Self::MalformedData(msg) => write!(f, "Dataset is malformed: {}", msg),
      Self::EmptyDataset(msg) => write!(f, "No usable rows in dataset: {}", msg),
      Self::BadRequest(msg) => write!(f, "Bad request: {}", msg),
      Self::InternalError(msg) => write!(f, "Internal error: {}", msg),
    }
  }
}

impl std::error::Error for AppError {}

impl From<ParseError> for AppError {
  fn from(value: ParseError) -> Self {
    match value {
      ParseError::MissingColumns(cols) => AppError::MissingColumns(cols),
      other => AppError::MalformedData(other.to_string()),
    }
  }
}

impl AppError {
  pub fn status(&self) -> StatusCode {
    match self {
      Self::FetchError(_) => StatusCode::BAD_GATEWAY,
      Self::MissingColumns(_) | Self::MalformedData(_) | Self::EmptyDataset(_) => StatusCode::UNPROCESSABLE_ENTITY,
      Self::BadRequest(_) => StatusCode::BAD_REQUEST,
      Self::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for AppError {
  fn into_response(self) -> axum::response::Response {
    let status = self.status();
    let body = Json(json!({"error": self.to_string(), "code": status.as_u16()}));

    (status, body).into_response()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_errors_map_onto_app_errors() {
    let missing = AppError::from(ParseError::MissingColumns(vec!["market_cap".to_string()]));
    assert!(matches!(missing, AppError::MissingColumns(ref cols) if cols == &["market_cap"]));

    let bad_number = "x".parse::<f64>().expect_err("not a number");
    let malformed = AppError::from(ParseError::InvalidNumber { line: 4, column: "market_cap", value: "x".to_string(), err: bad_number });
    assert!(matches!(malformed, AppError::MalformedData(ref msg) if msg.contains("line 4")));
  }

  #[test]
  fn statuses() {
    assert_eq!(AppError::FetchError(String::new()).status(), StatusCode::BAD_GATEWAY);
    assert_eq!(AppError::EmptyDataset(String::new()).status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(AppError::BadRequest(String::new()).status(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::InternalError(String::new()).status(), StatusCode::INTERNAL_SERVER_ERROR);
  }
}
