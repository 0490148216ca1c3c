use chrono::NaiveDate;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdPackage, LdTruck, LdUserCheck, LdUsers};
use dioxus_free_icons::Icon;
use shared_types::{
    AppError, CreateCustomerRequest, CreateDeliveryRequest, CustomerSummary, Role, SessionUser,
    SubscriptionPlan, SubscriptionStatus, ALL_PLANS, ALL_SUBSCRIPTION_STATUSES,
};
use shared_ui::{
    use_notices, Button, ButtonVariant, Card, CardContent, CardHeader, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableEmpty, DataTableHeader, DataTableRow, DialogActions,
    DialogContent, DialogRoot, DialogTitle, FormSelect, Input, Skeleton, StatCard, StatGrid,
};

use crate::components::{DashboardHeader, DeliveryTable, PlanBadge};
use crate::format_helpers::format_date;

/// Counters, the customer list and the customer/delivery management dialogs.
#[component]
pub fn AdminDashboard(user: SessionUser) -> Element {
    let notices = use_notices();
    let mut stats = use_resource(|| async { server::api::get_admin_stats().await });
    let mut customers = use_resource(|| async { server::api::list_customers().await });
    let mut show_add = use_signal(|| false);
    let mut viewing = use_signal(|| None::<CustomerSummary>);

    let mut reload = move || {
        stats.restart();
        customers.restart();
    };

    let change_status = move |(customer_id, status): (uuid::Uuid, SubscriptionStatus)| {
        spawn(async move {
            match server::api::update_subscription_status(customer_id, status).await {
                Ok(_) => {
                    notices.success(format!(
                        "Subscription marked {}",
                        status.label().to_lowercase()
                    ));
                    customers.restart();
                }
                Err(e) => {
                    notices.error(AppError::friendly_message(&e.to_string()));
                }
            }
        });
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        div { class: "dashboard-page",
            DashboardHeader { title: Role::Admin.dashboard_title(), user }

            main { class: "dashboard-body",
                match &*stats.read() {
                    None => rsx! { Skeleton { lines: 2 } },
                    Some(Err(e)) => rsx! {
                        p { class: "dashboard-error", {AppError::friendly_message(&e.to_string())} }
                    },
                    Some(Ok(s)) => rsx! {
                        StatGrid {
                            StatCard {
                                label: "Total Customers",
                                value: s.total_customers.to_string(),
                                icon: rsx! { Icon { icon: LdUsers, width: 20, height: 20 } },
                            }
                            StatCard {
                                label: "Active Deliveries",
                                value: s.active_deliveries.to_string(),
                                icon: rsx! { Icon { icon: LdTruck, width: 20, height: 20 } },
                            }
                            StatCard {
                                label: "Total Deliveries",
                                value: s.total_deliveries.to_string(),
                                icon: rsx! { Icon { icon: LdPackage, width: 20, height: 20 } },
                            }
                            StatCard {
                                label: "Delivery Partners",
                                value: s.total_partners.to_string(),
                                icon: rsx! { Icon { icon: LdUserCheck, width: 20, height: 20 } },
                            }
                        }
                    },
                }

                Card {
                    CardHeader {
                        title: "Customers",
                        description: "Manage subscriptions and deliveries",
                        actions: rsx! {
                            Button { onclick: move |_| show_add.set(true), "Add Customer" }
                        },
                    }
                    CardContent {
                        match &*customers.read() {
                            None => rsx! { Skeleton { lines: 4 } },
                            Some(Err(e)) => rsx! {
                                p { class: "dashboard-error", {AppError::friendly_message(&e.to_string())} }
                            },
                            Some(Ok(list)) => rsx! {
                                CustomerTable {
                                    customers: list.clone(),
                                    on_status_change: change_status,
                                    on_view: move |c: CustomerSummary| viewing.set(Some(c)),
                                }
                            },
                        }
                    }
                }
            }

            if show_add() {
                AddCustomerDialog {
                    on_close: move |_| show_add.set(false),
                    on_created: move |c: CustomerSummary| {
                        show_add.set(false);
                        notices.success(format!("{} added", c.full_name));
                        reload();
                    },
                }
            }

            if let Some(customer) = viewing() {
                CustomerDeliveriesDialog {
                    key: "{customer.id}",
                    customer,
                    on_close: move |_| viewing.set(None),
                    on_scheduled: move |_| stats.restart(),
                }
            }
        }
    }
}

#[component]
fn CustomerTable(
    customers: Vec<CustomerSummary>,
    on_status_change: EventHandler<(uuid::Uuid, SubscriptionStatus)>,
    on_view: EventHandler<CustomerSummary>,
) -> Element {
    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Name" }
                DataTableColumn { "Phone" }
                DataTableColumn { "Plan" }
                DataTableColumn { "Status" }
                DataTableColumn { "Next Payment" }
                DataTableColumn { "" }
            }
            DataTableBody {
                if customers.is_empty() {
                    DataTableEmpty { columns: 6, message: "No customers yet" }
                }
                for customer in customers {
                    DataTableRow { key: "{customer.id}",
                        DataTableCell { "{customer.full_name}" }
                        DataTableCell { {customer.phone.clone().unwrap_or_else(|| "-".to_string())} }
                        DataTableCell { PlanBadge { plan: customer.subscription_plan.clone() } }
                        DataTableCell {
                            FormSelect {
                                value: customer.subscription_status.clone(),
                                onchange: move |e: Event<FormData>| {
                                    if let Some(status) = SubscriptionStatus::parse(&e.value()) {
                                        on_status_change.call((customer.id, status));
                                    }
                                },
                                for status in ALL_SUBSCRIPTION_STATUSES {
                                    option { value: status.as_str(), {status.label()} }
                                }
                            }
                        }
                        DataTableCell { {format_date(customer.next_payment_date)} }
                        DataTableCell {
                            Button {
                                variant: ButtonVariant::Ghost,
                                onclick: {
                                    let customer = customer.clone();
                                    move |_| on_view.call(customer.clone())
                                },
                                "Deliveries"
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn AddCustomerDialog(on_close: EventHandler<()>, on_created: EventHandler<CustomerSummary>) -> Element {
    let mut full_name = use_signal(String::new);
    let mut username = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut phone = use_signal(String::new);
    let mut plan = use_signal(|| SubscriptionPlan::default().as_str().to_string());
    let mut status = use_signal(|| SubscriptionStatus::Active.as_str().to_string());
    let mut address = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut saving = use_signal(|| false);

    let handle_submit = move |evt: FormEvent| {
        evt.prevent_default();
        let req = CreateCustomerRequest {
            full_name: full_name(),
            username: username(),
            password: password(),
            phone: Some(phone()).filter(|p| !p.trim().is_empty()),
            subscription_plan: SubscriptionPlan::parse(&plan()).unwrap_or_default(),
            subscription_status: SubscriptionStatus::parse(&status()).unwrap_or_default(),
            delivery_address: address(),
        };
        saving.set(true);
        error.set(None);
        spawn(async move {
            match server::api::add_customer(req).await {
                Ok(customer) => on_created.call(customer),
                Err(e) => error.set(Some(AppError::friendly_message(&e.to_string()))),
            }
            saving.set(false);
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
                DialogTitle { "Add Customer" }
                form { class: "dialog-form", onsubmit: handle_submit,
                    if let Some(message) = error() {
                        div { class: "form-error", "{message}" }
                    }
                    Input {
                        id: "customer-full-name",
                        label: "Full Name",
                        required: true,
                        value: full_name(),
                        on_input: move |e: FormEvent| full_name.set(e.value()),
                    }
                    Input {
                        id: "customer-username",
                        label: "Username",
                        required: true,
                        value: username(),
                        placeholder: "Used to sign in",
                        on_input: move |e: FormEvent| username.set(e.value()),
                    }
                    Input {
                        id: "customer-password",
                        label: "Password",
                        input_type: "password",
                        required: true,
                        value: password(),
                        on_input: move |e: FormEvent| password.set(e.value()),
                    }
                    Input {
                        id: "customer-phone",
                        label: "Phone",
                        input_type: "tel",
                        value: phone(),
                        on_input: move |e: FormEvent| phone.set(e.value()),
                    }
                    div { class: "form-row",
                        FormSelect {
                            id: "customer-plan",
                            label: "Plan",
                            value: plan(),
                            onchange: move |e: Event<FormData>| plan.set(e.value()),
                            for p in ALL_PLANS {
                                option { value: p.as_str(), {p.label()} }
                            }
                        }
                        FormSelect {
                            id: "customer-status",
                            label: "Status",
                            value: status(),
                            onchange: move |e: Event<FormData>| status.set(e.value()),
                            for s in ALL_SUBSCRIPTION_STATUSES {
                                option { value: s.as_str(), {s.label()} }
                            }
                        }
                    }
                    Input {
                        id: "customer-address",
                        label: "Delivery Address",
                        required: true,
                        value: address(),
                        on_input: move |e: FormEvent| address.set(e.value()),
                    }
                    DialogActions {
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| on_close.call(()),
                            "Cancel"
                        }
                        Button { button_type: "submit", loading: saving(), "Add Customer" }
                    }
                }
            }
        }
    }
}

/// Delivery history for one customer plus the "Schedule Delivery" form.
#[component]
fn CustomerDeliveriesDialog(
    customer: CustomerSummary,
    on_close: EventHandler<()>,
    on_scheduled: EventHandler<()>,
) -> Element {
    let notices = use_notices();
    let customer_id = customer.id;
    let mut deliveries =
        use_resource(move || async move { server::api::list_customer_deliveries(customer_id).await });

    let mut date = use_signal(String::new);
    let mut items = use_signal(String::new);
    let mut address = use_signal(String::new);
    let mut saving = use_signal(|| false);

    let handle_schedule = move |evt: FormEvent| {
        evt.prevent_default();
        let Ok(delivery_date) = NaiveDate::parse_from_str(&date(), "%Y-%m-%d") else {
            notices.error("Please pick a delivery date");
            return;
        };
        let req = CreateDeliveryRequest {
            customer_id,
            delivery_date,
            items: items(),
            delivery_address: Some(address()).filter(|a| !a.trim().is_empty()),
        };
        saving.set(true);
        spawn(async move {
            match server::api::schedule_delivery(req).await {
                Ok(_) => {
                    notices.success("Delivery scheduled");
                    items.set(String::new());
                    deliveries.restart();
                    on_scheduled.call(());
                }
                Err(e) => {
                    notices.error(AppError::friendly_message(&e.to_string()));
                }
            }
            saving.set(false);
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

                match &*deliveries.read() {
                    None => rsx! { Skeleton { lines: 3 } },
                    Some(Err(e)) => rsx! {
                        p { class: "dashboard-error", {AppError::friendly_message(&e.to_string())} }
                    },
                    Some(Ok(list)) => rsx! { DeliveryTable { deliveries: list.clone() } },
                }

                h4 { class: "dialog-section-title", "Schedule Delivery" }
                form { class: "dialog-form", onsubmit: handle_schedule,
                    div { class: "form-row",
                        Input {
                            id: "delivery-date",
                            label: "Date",
                            input_type: "date",
                            required: true,
                            value: date(),
                            on_input: move |e: FormEvent| date.set(e.value()),
                        }
                        Input {
                            id: "delivery-items",
                            label: "Items",
                            required: true,
                            value: items(),
                            placeholder: "e.g. 2 kg apples, 6 oranges",
                            on_input: move |e: FormEvent| items.set(e.value()),
                        }
                    }
                    Input {
                        id: "delivery-address",
                        label: "Address",
                        value: address(),
                        placeholder: customer.delivery_address.clone(),
                        on_input: move |e: FormEvent| address.set(e.value()),
                    }
                    DialogActions {
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| on_close.call(()),
                            "Close"
                        }
                        Button { button_type: "submit", loading: saving(), "Schedule Delivery" }
                    }
                }
            }
        }
    }
}
