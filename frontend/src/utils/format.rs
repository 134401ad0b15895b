/// `1234567.891` -> `1,234,567.89` with `dp` decimals.
pub fn group_thousands(value: f64, dp: usize) -> String {
  let fixed = format!("{:.*}", dp, value.abs());
  let (int_part, frac_part) = match fixed.split_once('.') {
    Some((i, f)) => (i, Some(f)),
    None => (fixed.as_str(), None),
  };

  let mut grouped = String::new();
  for (idx, ch) in int_part.chars().enumerate() {
    if idx > 0 && (int_part.len() - idx) % 3 == 0 {
      grouped.push(',');
    }
    grouped.push(ch);
  }
  let sign = if value < 0.0 && fixed.chars().any(|c| c != '0' && c != '.') { "-" } else { "" };

  match frac_part {
    Some(frac) => format!("{}{}.{}", sign, grouped, frac),
    None => format!("{}{}", sign, grouped),
  }
}

/// Prices span many orders of magnitude; sub-dollar coins keep their significant digits.
pub fn format_price(price: f64) -> String {
  if price != 0.0 && price.abs() < 1.0 {
    format!("${}", price)
  } else {
    format!("${}", group_thousands(price, 2))
  }
}

pub fn format_percent(change: f64) -> String {
  format!("{:+.2}%", change)
}
