#![allow(non_snake_case)]

use dioxus::prelude::*;

use crate::utils::server::{clamp_top_n, TOP_N_MAX, TOP_N_MIN};

/// The slider only commits on release so dragging does not flood the backend.
#[component]
pub fn Sidebar(mut top_n: Signal<usize>) -> Element {
  let mut pending = use_signal(|| top_n());

  rsx! {
    aside {
      class: "sidebar",
      h2 { "🔍 Filter Data" },
      label {
        r#for: "top-n-slider",
        "Top N cryptocurrencies by market cap"
      },
      input {
        id: "top-n-slider",
        r#type: "range",
        min: "{TOP_N_MIN}",
        max: "{TOP_N_MAX}",
        step: "1",
        value: "{pending}",
        oninput: move |evt| {
          if let Ok(n) = evt.value().parse::<usize>() {
            pending.set(n);
          }
        },
        onchange: move |evt| {
          if let Ok(n) = evt.value().parse::<usize>() {
            top_n.set(clamp_top_n(n));
          }
        }
      },
      div {
        class: "slider-value",
        "{pending}"
      },
      div {
        class: "slider-range",
        span { "{TOP_N_MIN}" },
        span { "{TOP_N_MAX}" }
      }
    }
  }
}
