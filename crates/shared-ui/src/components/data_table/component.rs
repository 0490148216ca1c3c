use dioxus::prelude::*;

/// Scrollable table. Children are `thead`/`tbody` built from the helpers
/// below.
#[component]
pub fn DataTable(children: Element) -> Element {
    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "data-table",
            table { {children} }
        }
    }
}

/// `thead > tr` holding [`DataTableColumn`]s.
#[component]
pub fn DataTableHeader(children: Element) -> Element {
    rsx! {
        thead {
            tr { {children} }
        }
    }
}

#[component]
pub fn DataTableBody(children: Element) -> Element {
    rsx! {
        tbody { {children} }
    }
}

#[component]
pub fn DataTableColumn(children: Element) -> Element {
    rsx! {
        th { {children} }
    }
}

#[component]
pub fn DataTableRow(children: Element) -> Element {
    rsx! {
        tr { class: "data-table-row", {children} }
    }
}

#[component]
pub fn DataTableCell(children: Element) -> Element {
    rsx! {
        td { {children} }
    }
}

/// Single full-width row shown when a table has no rows.
#[component]
pub fn DataTableEmpty(columns: usize, message: String) -> Element {
    rsx! {
        tr {
            td { class: "data-table-empty", colspan: "{columns}", "{message}" }
        }
    }
}
