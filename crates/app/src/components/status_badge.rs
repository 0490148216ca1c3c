use dioxus::prelude::*;
use shared_types::{DeliveryStatus, SubscriptionPlan, SubscriptionStatus};
use shared_ui::{Badge, BadgeVariant};

use crate::format_helpers::humanize_tag;

#[component]
pub fn SubscriptionStatusBadge(status: String) -> Element {
    let (variant, label) = match SubscriptionStatus::parse(&status) {
        Some(SubscriptionStatus::Active) => (BadgeVariant::Success, "Active".to_string()),
        Some(SubscriptionStatus::Inactive) => (BadgeVariant::Neutral, "Inactive".to_string()),
        None => (BadgeVariant::Outline, humanize_tag(&status)),
    };
    rsx! { Badge { variant, "{label}" } }
}

#[component]
pub fn PlanBadge(plan: String) -> Element {
    let label = SubscriptionPlan::parse(&plan)
        .map(|p| p.label().to_string())
        .unwrap_or_else(|| humanize_tag(&plan));
    rsx! { Badge { variant: BadgeVariant::Outline, "{label}" } }
}

#[component]
pub fn DeliveryStatusBadge(status: String) -> Element {
    let parsed = DeliveryStatus::parse(&status);
    let variant = match parsed {
        Some(DeliveryStatus::Delivered) => BadgeVariant::Success,
        Some(DeliveryStatus::Failed) => BadgeVariant::Destructive,
        Some(s) if s.is_active() => BadgeVariant::Warning,
        _ => BadgeVariant::Outline,
    };
    let label = parsed
        .map(|s| s.label().to_string())
        .unwrap_or_else(|| humanize_tag(&status));
    rsx! { Badge { variant, "{label}" } }
}
