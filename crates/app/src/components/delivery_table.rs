use dioxus::prelude::*;
use shared_types::{Delivery, DeliveryOutcome};
use shared_ui::{
    Button, ButtonVariant, DataTable, DataTableBody, DataTableCell, DataTableColumn,
    DataTableEmpty, DataTableHeader, DataTableRow,
};

use super::DeliveryStatusBadge;
use crate::format_helpers::{format_date, format_datetime};

/// Deliveries, newest first as given. With `on_outcome`, deliveries that are
/// not yet delivered get "Mark Delivered" / "Not Delivered" buttons.
#[component]
pub fn DeliveryTable(
    deliveries: Vec<Delivery>,
    #[props(default)] on_outcome: Option<EventHandler<(uuid::Uuid, DeliveryOutcome)>>,
) -> Element {
    let with_actions = on_outcome.is_some();
    let columns = if with_actions { 5 } else { 4 };

    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Date" }
                DataTableColumn { "Items" }
                DataTableColumn { "Status" }
                DataTableColumn { "Delivered" }
                if with_actions {
                    DataTableColumn { "" }
                }
            }
            DataTableBody {
                if deliveries.is_empty() {
                    DataTableEmpty { columns, message: "No deliveries yet" }
                }
                for delivery in deliveries {
                    DataTableRow { key: "{delivery.id}",
                        DataTableCell { {format_date(delivery.delivery_date)} }
                        DataTableCell { "{delivery.items}" }
                        DataTableCell {
                            DeliveryStatusBadge { status: delivery.delivery_status.clone() }
                        }
                        DataTableCell {
                            {delivery.delivered_at.map(format_datetime).unwrap_or_else(|| "-".to_string())}
                        }
                        if let Some(handler) = on_outcome {
                            DataTableCell {
                                if !delivery.is_delivered() {
                                    div { class: "delivery-actions",
                                        Button {
                                            variant: ButtonVariant::Primary,
                                            onclick: move |_| handler.call((delivery.id, DeliveryOutcome::Delivered)),
                                            "Mark Delivered"
                                        }
                                        Button {
                                            variant: ButtonVariant::Outline,
                                            onclick: move |_| handler.call((delivery.id, DeliveryOutcome::NotDelivered)),
                                            "Not Delivered"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
