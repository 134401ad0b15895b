use std::{fmt, num::ParseFloatError};
use csv::{ReaderBuilder, StringRecord, Trim};

use super::record::{RawAsset, RawTable, CURRENT_PRICE, MARKET_CAP, NAME, PRICE_CHANGE_24H, REQUIRED_COLUMNS, SYMBOL, TOTAL_VOLUME};

// cells dataframe tooling writes (and reads back) as missing
const MISSING_TOKENS: [&str; 19] = [
  "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
  "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Debug)]
pub enum ParseError {
  MissingColumns(Vec<String>),
  InvalidNumber { line: u64, column: &'static str, value: String, err: ParseFloatError },
  NonFinite { line: u64, column: &'static str, value: String },
  Malformed(csv::Error),
}

impl fmt::Display for ParseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Self::MissingColumns(cols) => {
        write!(f, "Dataset is missing required columns: {}", cols.join(", "))
      },
      Self::InvalidNumber { line, column, value, err } => {
        write!(f, "Failed to parse {} on line {}: {:?} ({})", column, line, value, err)
      },
      Self::NonFinite { line, column, value } => {
        write!(f, "Non-finite {} on line {}: {:?}", column, line, value)
      },
      Self::Malformed(err) => {
        write!(f, "Malformed CSV: {}", err)
      }
    }
  }
}

impl std::error::Error for ParseError {}

impl From<csv::Error> for ParseError {
  fn from(value: csv::Error) -> Self {
    ParseError::Malformed(value)
  }
}

/// Positions of the required columns in the header row. Extra columns are ignored.
struct ColumnIndex {
  name: usize,
  symbol: usize,
  current_price: usize,
  market_cap: usize,
  total_volume: usize,
  price_change_percentage_24h: usize,
}

impl ColumnIndex {
  fn from_headers(headers: &StringRecord) -> Result<Self, ParseError> {
    let lookup = |col: &str| headers.iter().position(|h| h == col);

    let missing = REQUIRED_COLUMNS.into_iter()
      .filter(|&col| lookup(col).is_none())
      .map(String::from)
      .collect::<Vec<_>>();
    if !missing.is_empty() {
      return Err(ParseError::MissingColumns(missing));
    }

    let position = |col: &str| lookup(col).ok_or_else(|| ParseError::MissingColumns(vec![col.to_string()]));
    Ok(Self {
      name: position(NAME)?,
      symbol: position(SYMBOL)?,
      current_price: position(CURRENT_PRICE)?,
      market_cap: position(MARKET_CAP)?,
      total_volume: position(TOTAL_VOLUME)?,
      price_change_percentage_24h: position(PRICE_CHANGE_24H)?,
    })
  }
}

fn parse_cell(record: &StringRecord, idx: usize, column: &'static str) -> Result<Option<f64>, ParseError> {
  let raw = record.get(idx).unwrap_or("");
  if MISSING_TOKENS.contains(&raw) {
    return Ok(None);
  }
  let line = record.position().map_or(0, |p| p.line());
  match raw.parse::<f64>() {
    Ok(value) if value.is_nan() => Ok(None),
    Ok(value) if value.is_infinite() => {
      Err(ParseError::NonFinite { line, column, value: raw.to_string() })
    },
    Ok(value) => Ok(Some(value)),
    Err(err) => Err(ParseError::InvalidNumber { line, column, value: raw.to_string(), err }),
  }
}

impl RawAsset {
  fn parse(record: &StringRecord, cols: &ColumnIndex) -> Result<Self, ParseError> {
    Ok(RawAsset {
      name: record.get(cols.name).unwrap_or_default().to_string(),
      symbol: record.get(cols.symbol).unwrap_or_default().to_string(),
      current_price: parse_cell(record, cols.current_price, CURRENT_PRICE)?,
      market_cap: parse_cell(record, cols.market_cap, MARKET_CAP)?,
      total_volume: parse_cell(record, cols.total_volume, TOTAL_VOLUME)?,
      price_change_percentage_24h: parse_cell(record, cols.price_change_percentage_24h, PRICE_CHANGE_24H)?,
    })
  }
}

/// Parses a comma-delimited file with a header row into the raw asset table.
/// Fails on the first malformed line; rows are never silently skipped here.
pub fn parse_dataset(contents: &[u8]) -> Result<RawTable, ParseError> {
  let mut reader = ReaderBuilder::new()
    .has_headers(true)
    .trim(Trim::All)
    .from_reader(contents);

  let cols = ColumnIndex::from_headers(reader.headers()?)?;

  let mut rows = vec![];
  for record in reader.records() {
    let record = record?;
    rows.push(RawAsset::parse(&record, &cols)?);
  }

  Ok(RawTable::new(rows))
}
