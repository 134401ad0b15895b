use serde::Serialize;

pub const NAME: &str = "name";
pub const SYMBOL: &str = "symbol";
pub const CURRENT_PRICE: &str = "current_price";
pub const MARKET_CAP: &str = "market_cap";
pub const TOTAL_VOLUME: &str = "total_volume";
pub const PRICE_CHANGE_24H: &str = "price_change_percentage_24h";

/// Columns the remote file must carry, in the order the table view shows them.
pub const REQUIRED_COLUMNS: [&str; 6] = [NAME, SYMBOL, CURRENT_PRICE, MARKET_CAP, TOTAL_VOLUME, PRICE_CHANGE_24H];

/// One row as it came off the wire. Numeric cells are `None` when the file marks them missing.
#[derive(Debug, Clone, PartialEq)]
pub struct RawAsset {
  pub name: String,
  pub symbol: String,
  pub current_price: Option<f64>,
  pub market_cap: Option<f64>,
  pub total_volume: Option<f64>,
  pub price_change_percentage_24h: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
  pub rows: Vec<RawAsset>,
}

impl RawTable {
  pub fn new(rows: Vec<RawAsset>) -> Self {
    Self { rows }
  }

  pub fn len(&self) -> usize {
    self.rows.len()
  }

  pub fn is_empty(&self) -> bool {
    self.rows.is_empty()
  }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssetRecord {
  pub name: String,
  pub symbol: String,
  pub current_price: f64,
  pub market_cap: f64,
  pub total_volume: f64,
  pub price_change_percentage_24h: f64,
  pub market_cap_scaled: f64,
}

#[cfg(test)]
impl AssetRecord {
  /// Drops the derived column so a cleaned record can be fed back through preparation.
  pub fn to_raw(&self) -> RawAsset {
    RawAsset {
      name: self.name.clone(),
      symbol: self.symbol.clone(),
      current_price: Some(self.current_price),
      market_cap: Some(self.market_cap),
      total_volume: Some(self.total_volume),
      price_change_percentage_24h: Some(self.price_change_percentage_24h),
    }
  }
}
