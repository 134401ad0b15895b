#![allow(non_snake_case)]

use dioxus::prelude::*;

#[component]
pub fn ErrorToast(message: String) -> Element {
  rsx! {
    div {
      class: "toast toast-error",
      role: "alert",
      strong { "Something went wrong" },
      p { "{message}" }
    }
  }
}
