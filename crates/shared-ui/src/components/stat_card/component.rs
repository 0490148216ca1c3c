use dioxus::prelude::*;

/// A labelled counter, e.g. "Total Customers 42".
#[component]
pub fn StatCard(label: String, value: String, #[props(default)] icon: Option<Element>) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "stat-card",
            div { class: "stat-card-top",
                span { class: "stat-card-label", "{label}" }
                if let Some(icon) = icon {
                    span { class: "stat-card-icon", {icon} }
                }
            }
            span { class: "stat-card-value", "{value}" }
        }
    }
}

/// Responsive grid for a row of [`StatCard`]s.
#[component]
pub fn StatGrid(children: Element) -> Element {
    rsx! {
        div { class: "stat-grid", {children} }
    }
}
