use dioxus::prelude::*;
use dioxus_primitives::tabs as prim;

/// Prefix a caller's class list with the component's own class.
fn merged_class(base: &str, extra: Option<&str>) -> String {
    match extra.map(str::trim).filter(|c| !c.is_empty()) {
        Some(extra) if extra.split_whitespace().any(|c| c == base) => extra.to_string(),
        Some(extra) => format!("{base} {extra}"),
        None => base.to_string(),
    }
}

/// Tab group. Triggers and panels are matched by `value`.
#[component]
pub fn Tabs(mut props: prim::TabsProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "tabs", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::Tabs { ..props }
    }
}

#[component]
pub fn TabList(mut props: prim::TabListProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "tab-list", None, false));

    rsx! {
        prim::TabList { ..props }
    }
}

#[component]
pub fn TabTrigger(mut props: prim::TabTriggerProps) -> Element {
    props.class = Some(merged_class("tab-trigger", props.class.as_deref()));

    rsx! {
        prim::TabTrigger { ..props }
    }
}

#[component]
pub fn TabContent(mut props: prim::TabContentProps) -> Element {
    props.class = Some(merged_class("tab-content", props.class.as_deref()));

    rsx! {
        prim::TabContent { ..props }
    }
}
