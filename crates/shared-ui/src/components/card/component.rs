use dioxus::prelude::*;

fn with_class(class: &'static str, attributes: Vec<Attribute>) -> Vec<Attribute> {
    dioxus_primitives::merge_attributes(vec![
        vec![Attribute::new("class", class, None, false)],
        attributes,
    ])
}

/// Bordered surface that groups one topic on a dashboard.
#[component]
pub fn Card(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let merged = with_class("card", attributes);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        section {
            ..merged,
            {children}
        }
    }
}

/// Title row of a card. `actions` render on the right-hand side.
#[component]
pub fn CardHeader(
    title: String,
    #[props(default)] description: Option<String>,
    #[props(default)] actions: Option<Element>,
) -> Element {
    rsx! {
        header { class: "card-header",
            div {
                h3 { class: "card-title", "{title}" }
                if let Some(description) = description {
                    p { class: "card-description", "{description}" }
                }
            }
            if let Some(actions) = actions {
                div { class: "card-action", {actions} }
            }
        }
    }
}

#[component]
pub fn CardContent(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let merged = with_class("card-content", attributes);

    rsx! {
        div {
            ..merged,
            {children}
        }
    }
}
