use dioxus::prelude::*;
use shared_types::{AppError, CustomerSummary, DeliveryOutcome, Role, SessionUser};
use shared_ui::{
    use_notices, Button, ButtonVariant, Card, CardContent, CardHeader, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, DialogActions,
    DialogContent, DialogRoot, DialogTitle, Skeleton,
};
use uuid::Uuid;

use crate::components::{DashboardHeader, DeliveryTable, SubscriptionStatusBadge};

#[component]
pub fn DeliveryPartnerDashboard(user: SessionUser) -> Element {
    let customers = use_resource(|| async { server::api::list_partner_customers().await });
    let mut viewing = use_signal(|| None::<CustomerSummary>);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        div { class: "dashboard-page",
            DashboardHeader { title: Role::DeliveryPartner.dashboard_title(), user }

            main { class: "dashboard-body",
                Card {
                    CardHeader {
                        title: "Customers",
                        description: "Addresses and delivery history",
                    }
                    CardContent {
                        match &*customers.read() {
                            None => rsx! { Skeleton { lines: 4 } },
                            Some(Err(e)) => rsx! {
                                p { class: "dashboard-error", {AppError::friendly_message(&e.to_string())} }
                            },
                            Some(Ok(list)) => rsx! {
                                DataTable {
                                    DataTableHeader {
                                        DataTableColumn { "Name" }
                                        DataTableColumn { "Phone" }
                                        DataTableColumn { "Address" }
                                        DataTableColumn { "Status" }
                                        DataTableColumn { "" }
                                    }
                                    DataTableBody {
                                        if list.is_empty() {
                                            DataTableEmpty { columns: 5, message: "No customers to deliver to" }
                                        }
                                        for customer in list.iter().cloned() {
                                            DataTableRow { key: "{customer.id}",
                                                DataTableCell { "{customer.full_name}" }
                                                DataTableCell { {customer.phone.clone().unwrap_or_else(|| "-".to_string())} }
                                                DataTableCell { "{customer.delivery_address}" }
                                                DataTableCell {
                                                    SubscriptionStatusBadge { status: customer.subscription_status.clone() }
                                                }
                                                DataTableCell {
                                                    Button {
                                                        variant: ButtonVariant::Outline,
                                                        onclick: {
                                                            let customer = customer.clone();
                                                            move |_| viewing.set(Some(customer.clone()))
                                                        },
                                                        "View Deliveries"
                                                    }
                                                }
                                            }
                                        }
                                    }
                                }
                            },
                        }
                    }
                }
            }

            if let Some(customer) = viewing() {
                PartnerDeliveriesDialog {
                    key: "{customer.id}",
                    customer,
                    on_close: move |_| viewing.set(None),
                }
            }
        }
    }
}

/// A customer's deliveries with outcome buttons on every undelivered row.
#[component]
fn PartnerDeliveriesDialog(customer: CustomerSummary, on_close: EventHandler<()>) -> Element {
    let notices = use_notices();
    let customer_id = customer.id;
    let mut deliveries =
        use_resource(move || async move { server::api::list_customer_deliveries(customer_id).await });

    let record = move |(delivery_id, outcome): (Uuid, DeliveryOutcome)| {
        spawn(async move {
            match server::api::record_delivery_outcome(delivery_id, outcome).await {
                Ok(delivery) => {
                    notices.success(format!(
                        "Delivery marked {}",
                        delivery.delivery_status.replace('_', " ")
                    ));
                    deliveries.restart();
                }
                Err(e) => {
                    notices.error(AppError::friendly_message(&e.to_string()));
                }
            }
        });
    };

    rsx! {
        DialogRoot {
            open: true,
            on_open_change: move |open: bool| {
                if !open {
                    on_close.call(());
                }
            },
            DialogContent {
                DialogTitle { "Deliveries for {customer.full_name}" }
                p { class: "dialog-subtitle", "{customer.delivery_address}" }

                match &*deliveries.read() {
                    None => rsx! { Skeleton { lines: 3 } },
                    Some(Err(e)) => rsx! {
                        p { class: "dashboard-error", {AppError::friendly_message(&e.to_string())} }
                    },
                    Some(Ok(list)) => rsx! {
                        DeliveryTable { deliveries: list.clone(), on_outcome: record }
                    },
                }

                DialogActions {
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
