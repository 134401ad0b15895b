#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::{
  components::{metrics::MetricCards, plot::{MarketCapBar, PriceChangeHist, PriceVsCapScatter}, sidebar::Sidebar, table::AssetTable, toast::ErrorToast},
  utils::{format::group_thousands, server::{fetch_dashboard, DatasetSummary, ViewModel, TOP_N_DEFAULT}}
};

#[component]
pub fn Dashboard() -> Element {
  static CSS: Asset = asset!("/assets/dashboard.css");

  let top_n = use_signal(|| TOP_N_DEFAULT);
  let client = use_signal(reqwest::Client::new);

  // re-runs whenever the committed slider value changes
  let view = use_resource(move || {
    let client = client();
    let n = top_n();
    async move { fetch_dashboard(&client, n).await }
  });

  let body = match &*view.read() {
    Some(Ok(vm)) => rsx! { DashboardBody { view: vm.clone() } },
    Some(Err(e)) => rsx! { ErrorToast { message: e.to_string() } },
    None => rsx! { div { class: "loading", "Loading dataset..." } },
  };

  rsx! {
    document::Stylesheet { href: CSS },
    div {
      class: "dashboard",
      Sidebar { top_n },
      main {
        class: "dashboard-main",
        h1 { "📊 Crypto Top 1000 Dashboard" },
        p {
          class: "subtitle",
          "Global dataset pulled from GitHub and visualised in the browser."
        },
        {body},
        Footer {}
      }
    }
  }
}

#[component]
fn DashboardBody(view: ViewModel) -> Element {
  let ViewModel { top_n, summary, metrics, bar, scatter, histogram, table } = view;
  let DatasetSummary { loaded_rows, retained_rows, dropped_rows, market_cap_median, market_cap_iqr } = summary;
  let median = group_thousands(market_cap_median, 0);
  let iqr = group_thousands(market_cap_iqr, 0);

  rsx! {
    MetricCards { metrics },
    p {
      class: "dataset-note",
      "Top {top_n} of {retained_rows} usable rows ({dropped_rows} of {loaded_rows} dropped for missing fields). "
      "Market cap scaling: median ${median}, IQR ${iqr}."
    },
    section {
      class: "chart-card",
      h2 { "📈 Market Cap of Top Cryptocurrencies" },
      MarketCapBar { bar }
    },
    section {
      class: "chart-card",
      h2 { "🔵 Price vs Market Cap" },
      PriceVsCapScatter { scatter }
    },
    section {
      class: "chart-card",
      h2 { "📊 24h Price Change Distribution" },
      PriceChangeHist { histogram }
    },
    section {
      h2 { "📄 Crypto Data" },
      AssetTable { rows: table }
    }
  }
}

#[component]
fn Footer() -> Element {
  rsx! {
    footer {
      class: "footer",
      hr {},
      p { "Crypto Top 1000 Dashboard | Global dataset from GitHub | Built with Dioxus" }
    }
  }
}
