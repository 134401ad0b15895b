use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use crate::dataset::record::AssetRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metric {
  pub label: &'static str,
  pub value: f64,
  pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
  pub count: Metric,
  pub mean_price: Metric,
  pub mean_market_cap: Metric,
}

fn mean(values: impl ExactSizeIterator<Item = f64>) -> f64 {
  let n = values.len();
  if n == 0 {
    return 0.0;
  }
  values.sum::<f64>() / n as f64
}

/// Inserts `,` between groups of three integer digits: `1234567.8` -> `1,234,567.8`.
fn group_thousands(number: &str) -> String {
  let (sign, unsigned) = match number.strip_prefix('-') {
    Some(rest) => ("-", rest),
    None => ("", number),
  };
  let (int_part, frac_part) = match unsigned.split_once('.') {
    Some((i, f)) => (i, Some(f)),
    None => (unsigned, None),
  };

  let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
  for (idx, ch) in int_part.chars().enumerate() {
    if idx > 0 && (int_part.len() - idx) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }

  match frac_part {
    Some(frac) => format!("{}{}.{}", sign, grouped, frac),
    None => format!("{}{}", sign, grouped),
  }
}

/// Dollar amount with thousands separators and `dp` decimals, e.g. `$1,234.50`.
/// Rounds the exact binary value, so `2.675` (stored just below) shows as `$2.67`.
pub fn format_usd(value: f64, dp: u32) -> String {
  let fixed = match Decimal::from_f64_retain(value) {
    Some(d) => {
      let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointNearestEven);
      format!("{:.*}", dp as usize, rounded)
    },
    // outside Decimal's range
    None => format!("{:.*}", dp as usize, value),
  };
  format!("${}", group_thousands(&fixed))
}

pub fn summarize(selection: &[&AssetRecord]) -> Metrics {
  let mean_price = mean(selection.iter().map(|r| r.current_price));
  let mean_market_cap = mean(selection.iter().map(|r| r.market_cap));

  Metrics {
    count: Metric {
      label: "Cryptocurrencies shown",
      value: selection.len() as f64,
      display: group_thousands(&selection.len().to_string()),
    },
    mean_price: Metric {
      label: "Average price",
      value: mean_price,
      display: format_usd(mean_price, 2),
    },
    mean_market_cap: Metric {
      label: "Average market cap",
      value: mean_market_cap,
      display: format_usd(mean_market_cap, 0),
    },
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn record(price: f64, cap: f64) -> AssetRecord {
    AssetRecord {
      name: "X".to_string(),
      symbol: "x".to_string(),
      current_price: price,
      market_cap: cap,
      total_volume: 1.0,
      price_change_percentage_24h: 0.0,
      market_cap_scaled: 0.0,
    }
  }

  #[test]
  fn groups_digits() {
    assert_eq!(group_thousands("0"), "0");
    assert_eq!(group_thousands("999"), "999");
    assert_eq!(group_thousands("1000"), "1,000");
    assert_eq!(group_thousands("1234567.89"), "1,234,567.89");
    assert_eq!(group_thousands("-12345"), "-12,345");
  }

  #[test]
  fn dollar_formatting() {
    assert_eq!(format_usd(1234.5, 2), "$1,234.50");
    assert_eq!(format_usd(0.004, 2), "$0.00");
    assert_eq!(format_usd(1_320_000_000_000.4, 0), "$1,320,000,000,000");
  }

  #[test]
  fn rounds_the_stored_float_not_its_shortest_repr() {
    // 2.675 is stored as 2.67499..., 1234.565 as 1234.56500000000005...
    assert_eq!(format_usd(2.675, 2), "$2.67");
    assert_eq!(format_usd(1234.565, 2), "$1,234.57");
  }

  #[test]
  fn means_over_selection_only() {
    let a = record(10.0, 100.0);
    let b = record(20.0, 300.0);
    let metrics = summarize(&[&a, &b]);

    assert_eq!(metrics.count.value, 2.0);
    assert_eq!(metrics.count.display, "2");
    assert_eq!(metrics.mean_price.value, 15.0);
    assert_eq!(metrics.mean_price.display, "$15.00");
    assert_eq!(metrics.mean_market_cap.value, 200.0);
    assert_eq!(metrics.mean_market_cap.display, "$200");
  }

  #[test]
  fn empty_selection_has_zero_means() {
    let metrics = summarize(&[]);
    assert_eq!(metrics.count.value, 0.0);
    assert_eq!(metrics.mean_price.value, 0.0);
  }
}
