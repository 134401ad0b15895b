#![allow(non_snake_case)]
mod pages;
mod components;
mod utils;

use dioxus::prelude::*;
use pages::dashboard::Dashboard;

#[derive(Routable, PartialEq, Clone)]
enum Route {
    #[route("/")]
    Dashboard {},
    #[route("/:..route")]
    PageNotFound { route: Vec<String> }
}

fn main() {
    dioxus::launch(App);
}

fn App() -> Element {
    rsx! { Router::<Route> {} }
}

fn missing_path(route: &[String]) -> String {
    format!("/{}", route.join("/"))
}

#[component]
fn PageNotFound(route: Vec<String>) -> Element {
    let path = missing_path(&route);
    rsx! {
        h1 { "Page not found" }
        p { "The dashboard lives at the root of this site." }
        pre { class: "route-log", "No page at {path}" }
    }
}
