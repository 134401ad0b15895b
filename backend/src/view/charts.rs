use serde::Serialize;

use crate::dataset::record::AssetRecord;

pub const HISTOGRAM_BINS: usize = 50;
pub const MIN_MARKER_PX: f64 = 4.0;
pub const MAX_MARKER_PX: f64 = 40.0;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
  pub title: &'static str,
  pub x_label: &'static str,
  pub y_label: &'static str,
  pub names: Vec<String>,
  pub market_caps: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
  pub name: String,
  pub market_cap: f64,
  pub current_price: f64,
  pub total_volume: f64,
  pub price_change_percentage_24h: f64,
  /// Marker diameter in px; marker area grows linearly with volume.
  pub marker_size: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterChart {
  pub title: &'static str,
  pub x_label: &'static str,
  pub y_label: &'static str,
  pub color_label: &'static str,
  pub points: Vec<ScatterPoint>,
  /// Range of the colour scale over `price_change_percentage_24h`.
  pub color_min: f64,
  pub color_max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HistogramBin {
  pub lower: f64,
  pub upper: f64,
  pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
  pub title: &'static str,
  pub x_label: &'static str,
  pub y_label: &'static str,
  pub bins: Vec<HistogramBin>,
}

pub fn bar_chart(selection: &[&AssetRecord]) -> BarChart {
  BarChart {
    title: "Market Cap of Top Cryptocurrencies",
    x_label: "Cryptocurrency",
    y_label: "Market Cap (USD)",
    names: selection.iter().map(|r| r.name.clone()).collect(),
    market_caps: selection.iter().map(|r| r.market_cap).collect(),
  }
}

fn marker_size(volume: f64, max_volume: f64) -> f64 {
  if max_volume <= 0.0 || volume <= 0.0 {
    return MIN_MARKER_PX;
  }
  (MAX_MARKER_PX * (volume / max_volume).sqrt()).max(MIN_MARKER_PX)
}

pub fn scatter_chart(selection: &[&AssetRecord]) -> ScatterChart {
  let max_volume = selection.iter().map(|r| r.total_volume).fold(0.0, f64::max);
  let (color_min, color_max) = selection.iter()
    .map(|r| r.price_change_percentage_24h)
    .fold(None, |range: Option<(f64, f64)>, v| match range {
      Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
      None => Some((v, v)),
    })
    .unwrap_or((0.0, 0.0));

  let points = selection.iter().map(|r| ScatterPoint {
    name: r.name.clone(),
    market_cap: r.market_cap,
    current_price: r.current_price,
    total_volume: r.total_volume,
    price_change_percentage_24h: r.price_change_percentage_24h,
    marker_size: marker_size(r.total_volume, max_volume),
  }).collect();

  ScatterChart {
    title: "Price vs Market Cap",
    x_label: "Market Cap",
    y_label: "Current Price",
    color_label: "24h change (%)",
    points,
    color_min,
    color_max,
  }
}

/// Equal-width bins spanning `[min, max]` of the data; the last bin is closed on the right.
/// A constant column gets bins spanning `[v - 0.5, v + 0.5]`.
pub fn bin_data(data: &[f64], num_bins: usize) -> Vec<HistogramBin> {
  if data.is_empty() || num_bins == 0 {
    return vec![];
  }

  let (min, max) = data.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
  let (lower, upper) = if min == max { (min - 0.5, max + 0.5) } else { (min, max) };
  let width = (upper - lower) / num_bins as f64;

  let mut counts = vec![0usize; num_bins];
  for &value in data {
    let idx = (((value - lower) / width).floor() as usize).min(num_bins - 1);
    counts[idx] += 1;
  }

  counts.into_iter().enumerate().map(|(idx, count)| HistogramBin {
    lower: lower + idx as f64 * width,
    upper: if idx + 1 == num_bins { upper } else { lower + (idx + 1) as f64 * width },
    count,
  }).collect()
}

pub fn price_change_histogram(selection: &[&AssetRecord]) -> Histogram {
  let changes = selection.iter().map(|r| r.price_change_percentage_24h).collect::<Vec<_>>();
  Histogram {
    title: "24h Price Change Distribution (%)",
    x_label: "price_change_percentage_24h",
    y_label: "count",
    bins: bin_data(&changes, HISTOGRAM_BINS),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(name: &str, cap: f64, volume: f64, change: f64) -> AssetRecord {
    AssetRecord {
      name: name.to_string(),
      symbol: name.to_lowercase(),
      current_price: cap / 1_000.0,
      market_cap: cap,
      total_volume: volume,
      price_change_percentage_24h: change,
      market_cap_scaled: 0.0,
    }
  }

  #[test]
  fn bar_keeps_selection_order() {
    let (a, b) = (record("A", 300.0, 1.0, 0.0), record("B", 100.0, 1.0, 0.0));
    let bar = bar_chart(&[&a, &b]);
    assert_eq!(bar.names, vec!["A", "B"]);
    assert_eq!(bar.market_caps, vec![300.0, 100.0]);
  }

  #[test]
  fn scatter_sizes_follow_volume() {
    let (a, b, c) = (record("A", 3.0, 400.0, -5.0), record("B", 2.0, 100.0, 2.0), record("C", 1.0, 0.0, 7.5));
    let scatter = scatter_chart(&[&a, &b, &c]);

    assert_eq!(scatter.points[0].marker_size, MAX_MARKER_PX);
    assert_eq!(scatter.points[1].marker_size, MAX_MARKER_PX / 2.0);
    assert_eq!(scatter.points[2].marker_size, MIN_MARKER_PX);
    assert_eq!((scatter.color_min, scatter.color_max), (-5.0, 7.5));
    assert_eq!(scatter.points[1].name, "B");
  }

  #[test]
  fn bins_cover_the_range_and_count_everything() {
    let data = (0..=100).map(|i| i as f64).collect::<Vec<_>>();
    let bins = bin_data(&data, 50);

    assert_eq!(bins.len(), 50);
    assert_eq!(bins[0].lower, 0.0);
    assert_eq!(bins[49].upper, 100.0);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 101);
    // the max lands in the last, right-closed bin
    assert_eq!(bins[49].count, 3);
    assert_eq!(bins[0].count, 2);
  }

  #[test]
  fn constant_data_gets_a_unit_span() {
    let bins = bin_data(&[3.0, 3.0, 3.0], 50);
    assert_eq!(bins[0].lower, 2.5);
    assert_eq!(bins[49].upper, 3.5);
    assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 3);
    let hit = bins.iter().find(|b| b.count == 3).expect("one bin holds every value");
    assert!(hit.lower - 1e-9 <= 3.0 && 3.0 <= hit.upper + 1e-9);
  }

  #[test]
  fn no_data_no_bins() {
    assert!(bin_data(&[], 50).is_empty());
  }
}
