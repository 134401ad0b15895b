use serde::Serialize;

use crate::midwares::app_state::AppError;
use super::{prepare::PreparedTable, record::AssetRecord};

pub const TOP_N_MIN: usize = 10;
pub const TOP_N_MAX: usize = 1_000;
pub const TOP_N_DEFAULT: usize = 100;

/// How many assets to show, always within `TOP_N_MIN..=TOP_N_MAX`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TopN(usize);

impl TopN {
  pub fn new(n: usize) -> Result<Self, AppError> {
    if !(TOP_N_MIN..=TOP_N_MAX).contains(&n) {
      return Err(AppError::BadRequest(
        format!("top_n must be between {} and {}, got {}", TOP_N_MIN, TOP_N_MAX, n)
      ));
    }
    Ok(Self(n))
  }

  pub fn get(self) -> usize {
    self.0
  }
}

impl Default for TopN {
  fn default() -> Self {
    Self(TOP_N_DEFAULT)
  }
}

/// The `n` largest market caps, descending. Equal market caps keep table order.
pub fn select_top_n(table: &PreparedTable, n: TopN) -> Vec<&AssetRecord> {
  let mut view = table.records.iter().collect::<Vec<_>>();
  // stable, so ties stay in original row order
  view.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));
  view.truncate(n.get());
  view
}
