use serde::Serialize;
use tracing::warn;

/// Non-parametric estimate of the inverse cdf using linear interpolation
/// `(1-g)*y[j] + g*y[j+1]`, where `j` and `g` are the integral and fractional
/// parts of `q * (n-1)`. `sorted` must be ascending and non-empty.
pub fn quantile(sorted: &[f64], q: f64) -> f64 {
  let n = sorted.len();
  let x = q * ((n - 1) as f64);
  let j = x.floor() as usize;
  let g = x - x.floor();

  let lower = sorted[j];
  let upper = if j + 1 > n - 1 { sorted[n - 1] } else { sorted[j + 1] };

  (1.0 - g) * lower + g * upper
}

/// Median/IQR scaling, fitted once over a full column.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RobustScaler {
  pub median: f64,
  pub iqr: f64,
  /// Divisor actually applied; equals `iqr` unless the IQR is zero.
  pub scale: f64,
}

impl RobustScaler {
  /// Returns `None` for an empty column.
  pub fn fit(values: &[f64]) -> Option<Self> {
    if values.is_empty() {
      return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let median = quantile(&sorted, 0.5);
    let iqr = quantile(&sorted, 0.75) - quantile(&sorted, 0.25);
    let scale = if iqr == 0.0 {
      warn!(median, rows = sorted.len(), "market cap IQR is zero, scaling by 1.0");
      1.0
    } else {
      iqr
    };

    Some(Self { median, iqr, scale })
  }

  pub fn transform(&self, x: f64) -> f64 {
    (x - self.median) / self.scale
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quantiles_interpolate_linearly() {
    let sorted = [1.0, 2.0, 3.0, 4.0];
    assert_eq!(quantile(&sorted, 0.0), 1.0);
    assert_eq!(quantile(&sorted, 1.0), 4.0);
    assert_eq!(quantile(&sorted, 0.5), 2.5);
    assert_eq!(quantile(&sorted, 0.25), 1.75);
    assert_eq!(quantile(&sorted, 0.75), 3.25);
  }

  #[test]
  fn single_value_quantiles() {
    assert_eq!(quantile(&[42.0], 0.25), 42.0);
    assert_eq!(quantile(&[42.0], 0.75), 42.0);
  }

  #[test]
  fn skewed_market_caps() {
    let scaler = RobustScaler::fit(&[1.0, 2.0, 3.0, 4.0, 100.0]).expect("non-empty");
    assert_eq!(scaler.median, 3.0);
    assert_eq!(scaler.iqr, 2.0);
    assert_eq!(scaler.scale, 2.0);

    let scaled = [1.0, 2.0, 3.0, 4.0, 100.0].map(|x| scaler.transform(x));
    assert_eq!(scaled, [-1.0, -0.5, 0.0, 0.5, 48.5]);
  }

  #[test]
  fn fit_ignores_input_order() {
    let a = RobustScaler::fit(&[100.0, 3.0, 1.0, 4.0, 2.0]).expect("non-empty");
    let b = RobustScaler::fit(&[1.0, 2.0, 3.0, 4.0, 100.0]).expect("non-empty");
    assert_eq!(a, b);
  }

  #[test]
  fn zero_iqr_falls_back_to_unit_scale() {
    let scaler = RobustScaler::fit(&[5.0, 5.0, 5.0, 5.0, 9.0]).expect("non-empty");
    assert_eq!(scaler.iqr, 0.0);
    assert_eq!(scaler.scale, 1.0);
    assert_eq!(scaler.transform(5.0), 0.0);
    assert_eq!(scaler.transform(9.0), 4.0);
  }

  #[test]
  fn all_equal_column_scales_to_zero() {
    let scaler = RobustScaler::fit(&[7.0; 4]).expect("non-empty");
    assert!([7.0; 4].iter().all(|&x| scaler.transform(x) == 0.0));
  }

  #[test]
  fn empty_column_has_no_scaler() {
    assert_eq!(RobustScaler::fit(&[]), None);
  }
}
