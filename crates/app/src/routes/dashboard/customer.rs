use dioxus::prelude::*;
use shared_types::{AppError, CustomerOverview, Role, SessionUser};
use shared_ui::{Card, CardContent, CardHeader, Skeleton, StatCard, StatGrid};

use crate::components::{DashboardHeader, DeliveryTable, PlanBadge, SubscriptionStatusBadge};
use crate::format_helpers::format_date;

/// The signed-in customer's own subscription and delivery history.
#[component]
pub fn CustomerDashboard(user: SessionUser) -> Element {
    let overview = use_resource(|| async { server::api::get_my_subscription().await });

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        div { class: "dashboard-page",
            DashboardHeader { title: Role::Customer.dashboard_title(), user }

            main { class: "dashboard-body",
                match &*overview.read() {
                    None => rsx! { Skeleton { lines: 4 } },
                    Some(Err(e)) => rsx! {
                        p { class: "dashboard-error", {AppError::friendly_message(&e.to_string())} }
                    },
                    Some(Ok(overview)) => rsx! { Overview { overview: overview.clone() } },
                }
            }
        }
    }
}

#[component]
fn Overview(overview: CustomerOverview) -> Element {
    let Some(subscription) = overview.subscription.clone() else {
        return rsx! {
            Card {
                CardHeader {
                    title: "No active subscription",
                    description: "Contact The Fruit Union to start receiving fresh fruit.",
                }
            }
        };
    };
    let completed = overview.completed_deliveries();

    rsx! {
        StatGrid {
            StatCard { label: "Next Payment", value: format_date(subscription.next_payment_date) }
            StatCard { label: "Renews On", value: format_date(subscription.subscription_end_date) }
            StatCard { label: "Deliveries Received", value: completed.to_string() }
        }

        Card {
            CardHeader {
                title: "My Subscription",
                actions: rsx! {
                    PlanBadge { plan: subscription.subscription_plan.clone() }
                    SubscriptionStatusBadge { status: subscription.subscription_status.clone() }
                },
            }
            CardContent {
                dl { class: "detail-list",
                    dt { "Started" }
                    dd { {format_date(subscription.subscription_start_date)} }
                    dt { "Delivery Address" }
                    dd { "{subscription.delivery_address}" }
                }
            }
        }

        Card {
            CardHeader { title: "Delivery History" }
            CardContent {
                DeliveryTable { deliveries: overview.deliveries.clone() }
            }
        }
    }
}
