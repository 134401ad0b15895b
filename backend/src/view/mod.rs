pub mod charts;
pub mod metrics;

use serde::Serialize;

use crate::{
  dataset::{prepare::{prepare, PreparedTable}, record::{AssetRecord, RawTable}, selection::{select_top_n, TopN}},
  midwares::app_state::AppError
};
use charts::{bar_chart, price_change_histogram, scatter_chart, BarChart, Histogram, ScatterChart};
use metrics::{summarize, Metrics};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetSummary {
  pub loaded_rows: usize,
  pub retained_rows: usize,
  pub dropped_rows: usize,
  pub market_cap_median: f64,
  pub market_cap_iqr: f64,
}

/// One row of the data table, in display column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
  pub name: String,
  pub symbol: String,
  pub current_price: f64,
  pub market_cap: f64,
  pub total_volume: f64,
  pub price_change_percentage_24h: f64,
}

impl From<&AssetRecord> for TableRow {
  fn from(r: &AssetRecord) -> Self {
    TableRow {
      name: r.name.clone(),
      symbol: r.symbol.clone(),
      current_price: r.current_price,
      market_cap: r.market_cap,
      total_volume: r.total_volume,
      price_change_percentage_24h: r.price_change_percentage_24h,
    }
  }
}

/// Everything the page shows for one slider position.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewModel {
  pub top_n: usize,
  pub summary: DatasetSummary,
  pub metrics: Metrics,
  pub bar: BarChart,
  pub scatter: ScatterChart,
  pub histogram: Histogram,
  pub table: Vec<TableRow>,
}

pub fn present(prepared: &PreparedTable, selection: &[&AssetRecord], top_n: TopN) -> ViewModel {
  ViewModel {
    top_n: top_n.get(),
    summary: DatasetSummary {
      loaded_rows: prepared.loaded_rows,
      retained_rows: prepared.records.len(),
      dropped_rows: prepared.dropped_rows(),
      market_cap_median: prepared.scaler.median,
      market_cap_iqr: prepared.scaler.iqr,
    },
    metrics: summarize(selection),
    bar: bar_chart(selection),
    scatter: scatter_chart(selection),
    histogram: price_change_histogram(selection),
    table: selection.iter().map(|&r| TableRow::from(r)).collect(),
  }
}

/// Prepare, select and present in one pass over the cached raw table.
/// Pure: no I/O, safe to call once per interaction.
pub fn render(raw: &RawTable, top_n: TopN) -> Result<ViewModel, AppError> {
  let prepared = prepare(raw)?;
  let selection = select_top_n(&prepared, top_n);
  Ok(present(&prepared, &selection, top_n))
}

#[cfg(test)]
mod tests {
  use crate::dataset::{parser::parse_dataset, record::RawAsset, testing::SAMPLE_CSV};
  use super::*;

  fn sample() -> RawTable {
    parse_dataset(SAMPLE_CSV.as_bytes()).expect("fixture parses")
  }

  fn asset(name: &str, price: f64, cap: f64) -> RawAsset {
    RawAsset {
      name: name.to_string(),
      symbol: name.to_lowercase(),
      current_price: Some(price),
      market_cap: Some(cap),
      total_volume: Some(cap / 10.0),
      price_change_percentage_24h: Some(1.0),
    }
  }

  #[test]
  fn five_rows_top_three() {
    let raw = RawTable::new(vec![
      asset("A", 1.0, 100.0),
      asset("B", 2.0, 500.0),
      asset("C", 3.0, 300.0),
      asset("D", 4.0, 400.0),
      asset("E", 5.0, 200.0),
    ]);
    let prepared = prepare(&raw).expect("complete rows");
    let selection = select_top_n(&prepared, TopN::default());
    let top3 = &selection[..3];
    let view = present(&prepared, top3, TopN::default());

    let names = view.table.iter().map(|r| r.name.as_str()).collect::<Vec<_>>();
    assert_eq!(names, vec!["B", "D", "C"]);
    assert_eq!(view.metrics.count.value, 3.0);
    assert_eq!(view.metrics.mean_price.value, 3.0);
    assert_eq!(view.metrics.mean_market_cap.value, 400.0);
    assert_eq!(view.bar.names, vec!["B", "D", "C"]);
    assert_eq!(view.scatter.points.len(), 3);
    assert_eq!(view.histogram.bins.iter().map(|b| b.count).sum::<usize>(), 3);
    // scaling statistics still span all five rows
    assert_eq!(view.summary.market_cap_median, 300.0);
  }

  #[test]
  fn row_missing_volume_never_reaches_the_page() {
    let view = render(&sample(), TopN::default()).expect("fixture renders");

    assert_eq!(view.summary.loaded_rows, 6);
    assert_eq!(view.summary.retained_rows, 5);
    assert_eq!(view.summary.dropped_rows, 1);
    assert!(view.table.iter().all(|r| r.name != "Ghost Coin"));
    assert!(view.bar.names.iter().all(|n| n != "Ghost Coin"));
    assert!(view.scatter.points.iter().all(|p| p.name != "Ghost Coin"));
    assert_eq!(view.histogram.bins.iter().map(|b| b.count).sum::<usize>(), 5);
    assert_eq!(view.metrics.count.value, 5.0);
  }

  #[test]
  fn fixture_order_and_ties() {
    let view = render(&sample(), TopN::new(10).expect("in range")).expect("fixture renders");
    let symbols = view.table.iter().map(|r| r.symbol.as_str()).collect::<Vec<_>>();
    // sol and usdc share a market cap and keep file order
    assert_eq!(symbols, vec!["btc", "eth", "usdt", "sol", "usdc"]);
    assert_eq!(view.top_n, 10);
  }

  #[test]
  fn scaling_does_not_depend_on_top_n() {
    let rows = (0..400).map(|i| asset(&format!("C{}", i), 1.0, (i * i) as f64)).collect();
    let raw = RawTable::new(rows);

    let small = render(&raw, TopN::new(10).expect("in range")).expect("renders");
    let large = render(&raw, TopN::new(1_000).expect("in range")).expect("renders");

    assert_eq!(small.summary, large.summary);
    assert_eq!(small.table.len(), 10);
    assert_eq!(large.table.len(), 400);
  }

  #[test]
  fn empty_after_cleaning_is_an_error() {
    let mut row = asset("A", 1.0, 1.0);
    row.total_volume = None;
    assert!(matches!(render(&RawTable::new(vec![row]), TopN::default()), Err(AppError::EmptyDataset(_))));
  }
}
