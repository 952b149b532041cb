#![allow(non_snake_case)]
mod pages;
mod components;
mod utils;

use components::template::Template;
use dioxus::prelude::*;
use pages::overview::Overview;

#[derive(Routable, PartialEq, Clone)]
enum Route {
    #[layout(Template)]
    #[route("/")]
    Overview {},
    #[route("/:..route")]
    PageNotFound { route: Vec<String> }
}

fn main() {
    dioxus::launch(App);
}

fn App() -> Element {
    rsx! { Router::<Route> {} }
}

#[component]
fn PageNotFound(route: Vec<String>) -> Element {
    rsx! {
        h1 { "Page not found" }
        p { "We are terribly sorry, but the page you requested doesn't exist." }
        pre { color: "red", "log:\nattemped to navigate to: {route:?}" }
    }
}
