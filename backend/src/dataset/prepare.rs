use tracing::debug;

use crate::midwares::app_state::AppError;
use super::{record::{AssetRecord, RawAsset, RawTable}, scaler::RobustScaler};

/// Cleaned table with the scaled market cap column. Read-only once built.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedTable {
  pub records: Vec<AssetRecord>,
  pub scaler: RobustScaler,
  pub loaded_rows: usize,
}

impl PreparedTable {
  pub fn dropped_rows(&self) -> usize {
    self.loaded_rows - self.records.len()
  }
}

struct CompleteRow<'a> {
  raw: &'a RawAsset,
  current_price: f64,
  market_cap: f64,
  total_volume: f64,
  price_change_percentage_24h: f64,
}

fn complete_row(raw: &RawAsset) -> Option<CompleteRow<'_>> {
  Some(CompleteRow {
    raw,
    current_price: raw.current_price?,
    market_cap: raw.market_cap?,
    total_volume: raw.total_volume?,
    price_change_percentage_24h: raw.price_change_percentage_24h?,
  })
}

/// Drops rows missing any required numeric field, then fits the robust scaler on
/// the market caps of every surviving row and adds `market_cap_scaled`.
pub fn prepare(raw: &RawTable) -> Result<PreparedTable, AppError> {
  let complete = raw.rows.iter().filter_map(complete_row).collect::<Vec<_>>();

  let market_caps = complete.iter().map(|row| row.market_cap).collect::<Vec<_>>();
  let scaler = RobustScaler::fit(&market_caps).ok_or_else(|| AppError::EmptyDataset(
    format!("all {} loaded rows are missing a required field", raw.len())
  ))?;

  let records = complete.into_iter().map(|row| AssetRecord {
    name: row.raw.name.clone(),
    symbol: row.raw.symbol.clone(),
    current_price: row.current_price,
    market_cap: row.market_cap,
    total_volume: row.total_volume,
    price_change_percentage_24h: row.price_change_percentage_24h,
    market_cap_scaled: scaler.transform(row.market_cap),
  }).collect::<Vec<_>>();

  debug!(loaded = raw.len(), retained = records.len(), median = scaler.median, iqr = scaler.iqr, "prepared dataset");

  Ok(PreparedTable { records, scaler, loaded_rows: raw.len() })
}
