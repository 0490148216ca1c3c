use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn NotFound(route: Vec<String>) -> Element {
    let path = format!("/{}", route.join("/"));

    rsx! {
        div { class: "not-found-page",
            div { class: "not-found-card",
                div { class: "not-found-code", "404" }
                h1 { class: "not-found-title", "Page Not Found" }
                p { class: "not-found-message",
                    "Nothing grows at "
                    code { "{path}" }
                    "."
                }
                Link { to: Route::Home {}, class: "not-found-link", "Back to The Fruit Union" }
            }
        }
    }
}
