use dioxus::prelude::*;

/// Pulsing placeholder shown while data loads.
#[component]
pub fn Skeleton(
    #[props(default = 1)] lines: usize,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
) -> Element {
    let base = vec![Attribute::new("class", "skeleton-stack", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            "aria-busy": "true",
            ..merged,
            for i in 0..lines.max(1) {
                div { key: "{i}", class: "skeleton" }
            }
        }
    }
}

/// Centered spinner with a caption, for full-page waits.
#[component]
pub fn LoadingScreen(#[props(default = "Loading...".to_string())] message: String) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "loading-screen", role: "status",
            div { class: "loading-spinner" }
            p { "{message}" }
        }
    }
}
