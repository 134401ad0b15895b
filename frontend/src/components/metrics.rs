#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::utils::server::{Metric, Metrics};

#[component]
pub fn MetricCards(metrics: Metrics) -> Element {
  rsx! {
    div {
      class: "metric-row",
      MetricCard { metric: metrics.count },
      MetricCard { metric: metrics.mean_price },
      MetricCard { metric: metrics.mean_market_cap },
    }
  }
}

#[component]
fn MetricCard(metric: Metric) -> Element {
  let Metric { label, display, .. } = metric;

  rsx! {
    div {
      class: "metric-card",
      span { class: "metric-label", "{label}" },
      span { class: "metric-value", "{display}" }
    }
  }
}
