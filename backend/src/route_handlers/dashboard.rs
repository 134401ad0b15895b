use axum::{extract::{rejection::QueryRejection, Query, State}, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;

use crate::{
  dataset::selection::TopN,
  midwares::app_state::{AppError, AppState},
  view::{render, ViewModel}
};

#[derive(Debug, Deserialize)]
pub struct DashboardQuery {
  pub top_n: Option<usize>,
}

pub async fn dashboard_handler(
  State(state): State<AppState>,
  query: Result<Query<DashboardQuery>, QueryRejection>
) -> Result<Json<ViewModel>, AppError> {
  let Query(query) = query.map_err(|e| AppError::BadRequest(e.body_text()))?;
  let top_n = match query.top_n {
    Some(n) => TopN::new(n)?,
    None => TopN::default(),
  };

  let raw = state.cache.get().await?;
  let view = render(&raw, top_n)?;
  info!(top_n = top_n.get(), shown = view.table.len(), "rendered dashboard");

  Ok(Json(view))
}

pub async fn clear_cache_handler(State(state): State<AppState>) -> StatusCode {
  state.cache.clear().await;
  StatusCode::NO_CONTENT
}
