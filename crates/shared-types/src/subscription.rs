use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

use crate::Delivery;

/// Billing cadence of a fruit subscription.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionPlan {
    #[default]
    Monthly,
    Quarterly,
    Yearly,
}

pub const ALL_PLANS: &[SubscriptionPlan] = &[
    SubscriptionPlan::Monthly,
    SubscriptionPlan::Quarterly,
    SubscriptionPlan::Yearly,
];

impl SubscriptionPlan {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "monthly",
            SubscriptionPlan::Quarterly => "quarterly",
            SubscriptionPlan::Yearly => "yearly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionPlan::Monthly => "Monthly",
            SubscriptionPlan::Quarterly => "Quarterly",
            SubscriptionPlan::Yearly => "Yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ALL_PLANS.iter().copied().find(|p| p.as_str() == s)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    Active,
    #[default]
    Inactive,
}

pub const ALL_SUBSCRIPTION_STATUSES: &[SubscriptionStatus] =
    &[SubscriptionStatus::Active, SubscriptionStatus::Inactive];

impl SubscriptionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "active",
            SubscriptionStatus::Inactive => "inactive",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SubscriptionStatus::Active => "Active",
            SubscriptionStatus::Inactive => "Inactive",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ALL_SUBSCRIPTION_STATUSES
            .iter()
            .copied()
            .find(|st| st.as_str() == s)
    }
}

/// Length of the first billing period for admin-created subscriptions.
pub const INITIAL_PERIOD_DAYS: i64 = 30;

/// Period dates for a subscription starting on `start`:
/// `(start, end, next_payment)`.
pub fn initial_period(start: NaiveDate) -> (NaiveDate, NaiveDate, NaiveDate) {
    let end = start + chrono::Duration::days(INITIAL_PERIOD_DAYS);
    (start, end, end)
}

/// A `customers` row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: Uuid,
    pub user_id: Uuid,
    pub subscription_plan: String,
    pub subscription_status: String,
    pub subscription_start_date: NaiveDate,
    pub subscription_end_date: NaiveDate,
    pub next_payment_date: NaiveDate,
    pub delivery_address: String,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    pub fn is_active(&self) -> bool {
        SubscriptionStatus::parse(&self.subscription_status) == Some(SubscriptionStatus::Active)
    }
}

/// Customer joined with the owner's profile, as listed on staff dashboards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct CustomerSummary {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub phone: Option<String>,
    pub subscription_plan: String,
    pub subscription_status: String,
    pub subscription_end_date: NaiveDate,
    pub next_payment_date: NaiveDate,
    pub delivery_address: String,
}

/// Admin request that creates the login, profile, role and subscription of
/// a new customer in one go.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateCustomerRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Full name is required"))
    )]
    pub full_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Username is required"))
    )]
    pub username: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub subscription_plan: SubscriptionPlan,
    #[serde(default)]
    pub subscription_status: SubscriptionStatus,
    #[serde(default)]
    pub delivery_address: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct UpdateSubscriptionRequest {
    pub subscription_status: SubscriptionStatus,
}

/// Everything the customer dashboard shows. `subscription` is `None` when no
/// customer record exists for the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct CustomerOverview {
    pub subscription: Option<Customer>,
    pub deliveries: Vec<Delivery>,
}

impl CustomerOverview {
    /// Deliveries that actually reached the customer.
    pub fn completed_deliveries(&self) -> usize {
        self.deliveries.iter().filter(|d| d.is_delivered()).count()
    }
}
