#![allow(non_snake_case)]

use std::cmp::Ordering;
use dioxus::prelude::*;

use crate::utils::{format::{format_percent, format_price, group_thousands}, server::TableRow};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Column {
  Name,
  Symbol,
  CurrentPrice,
  MarketCap,
  TotalVolume,
  PriceChange24h,
}

impl Column {
  const ALL: [Column; 6] = [Column::Name, Column::Symbol, Column::CurrentPrice, Column::MarketCap, Column::TotalVolume, Column::PriceChange24h];

  fn header(self) -> &'static str {
    match self {
      Column::Name => "name",
      Column::Symbol => "symbol",
      Column::CurrentPrice => "current_price",
      Column::MarketCap => "market_cap",
      Column::TotalVolume => "total_volume",
      Column::PriceChange24h => "price_change_percentage_24h",
    }
  }

  fn compare(self, a: &TableRow, b: &TableRow) -> Ordering {
    match self {
      Column::Name => a.name.cmp(&b.name),
      Column::Symbol => a.symbol.cmp(&b.symbol),
      Column::CurrentPrice => a.current_price.total_cmp(&b.current_price),
      Column::MarketCap => a.market_cap.total_cmp(&b.market_cap),
      Column::TotalVolume => a.total_volume.total_cmp(&b.total_volume),
      Column::PriceChange24h => a.price_change_percentage_24h.total_cmp(&b.price_change_percentage_24h),
    }
  }
}

/// Rows in server order when `sort` is `None`, otherwise stably sorted by the column.
pub fn sorted_rows(rows: &[TableRow], sort: Option<(Column, bool)>) -> Vec<TableRow> {
  let mut rows = rows.to_vec();
  if let Some((column, descending)) = sort {
    rows.sort_by(|a, b| {
      let ord = column.compare(a, b);
      if descending { ord.reverse() } else { ord }
    });
  }
  rows
}

/// `#` column value: 1 for the largest market cap in the current order.
fn rank(idx: usize) -> usize {
  idx + 1
}

fn sort_marker(sort: Option<(Column, bool)>, column: Column) -> &'static str {
  match sort {
    Some((active, true)) if active == column => " ▼",
    Some((active, false)) if active == column => " ▲",
    _ => "",
  }
}

#[component]
pub fn AssetTable(rows: ReadOnlySignal<Vec<TableRow>>) -> Element {
  // (column, descending); clicking the active header flips direction
  let sort: Signal<Option<(Column, bool)>> = use_signal(|| None);
  let shown = use_memo(move || sorted_rows(&rows(), sort()));

  rsx! {
    div {
      class: "table-card",
      table {
        class: "asset-table",
        thead {
          tr {
            th { "#" },
            for column in Column::ALL {
              HeaderCell { key: "{column:?}", column, sort }
            }
          }
        },
        tbody {
          for (idx, row) in shown().into_iter().enumerate() {
            AssetRow { key: "{idx}", idx, row }
          }
        }
      }
    }
  }
}

#[component]
fn HeaderCell(column: Column, mut sort: Signal<Option<(Column, bool)>>) -> Element {
  let header = column.header();
  let marker = sort_marker(sort(), column);

  rsx! {
    th {
      class: "sortable",
      onclick: move |_| {
        let next = match sort() {
          Some((active, descending)) if active == column => Some((column, !descending)),
          _ => Some((column, false)),
        };
        sort.set(next);
      },
      "{header}{marker}"
    }
  }
}

#[component]
fn AssetRow(idx: usize, row: TableRow) -> Element {
  let TableRow { name, symbol, current_price, market_cap, total_volume, price_change_percentage_24h } = row;
  let price = format_price(current_price);
  let market_cap = group_thousands(market_cap, 0);
  let volume = group_thousands(total_volume, 0);
  let change = format_percent(price_change_percentage_24h);
  let change_class = if price_change_percentage_24h < 0.0 { "num change-down" } else { "num change-up" };
  let position = rank(idx);

  rsx! {
    tr {
      td { "{position}" },
      td { "{name}" },
      td { "{symbol}" },
      td { class: "num", "{price}" },
      td { class: "num", "${market_cap}" },
      td { class: "num", "${volume}" },
      td { class: change_class, "{change}" }
    }
  }
}
