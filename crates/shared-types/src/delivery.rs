use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    Pending,
    Assigned,
    InTransit,
    Delivered,
    Failed,
}

pub const ALL_DELIVERY_STATUSES: &[DeliveryStatus] = &[
    DeliveryStatus::Pending,
    DeliveryStatus::Assigned,
    DeliveryStatus::InTransit,
    DeliveryStatus::Delivered,
    DeliveryStatus::Failed,
];

/// Statuses counted as "active" on the admin stats card.
pub const ACTIVE_DELIVERY_STATUSES: &[DeliveryStatus] = &[
    DeliveryStatus::Pending,
    DeliveryStatus::Assigned,
    DeliveryStatus::InTransit,
];

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "pending",
            DeliveryStatus::Assigned => "assigned",
            DeliveryStatus::InTransit => "in_transit",
            DeliveryStatus::Delivered => "delivered",
            DeliveryStatus::Failed => "failed",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DeliveryStatus::Pending => "Pending",
            DeliveryStatus::Assigned => "Assigned",
            DeliveryStatus::InTransit => "In Transit",
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::Failed => "Failed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        ALL_DELIVERY_STATUSES
            .iter()
            .copied()
            .find(|st| st.as_str() == s)
    }

    pub fn is_active(&self) -> bool {
        ACTIVE_DELIVERY_STATUSES.contains(self)
    }
}

/// A `deliveries` row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "server", derive(sqlx::FromRow))]
pub struct Delivery {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub delivery_partner_id: Option<Uuid>,
    pub delivery_date: NaiveDate,
    pub delivery_status: String,
    pub items: String,
    pub delivery_address: String,
    pub delivered_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Delivery {
    pub fn status(&self) -> Option<DeliveryStatus> {
        DeliveryStatus::parse(&self.delivery_status)
    }

    pub fn is_delivered(&self) -> bool {
        self.status() == Some(DeliveryStatus::Delivered)
    }
}

/// Admin request scheduling a delivery for a customer. An empty
/// `delivery_address` falls back to the customer's own address.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct CreateDeliveryRequest {
    pub customer_id: Uuid,
    pub delivery_date: NaiveDate,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Items are required"))
    )]
    pub items: String,
    #[serde(default)]
    pub delivery_address: Option<String>,
}

/// Result a delivery partner records for a delivery.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum DeliveryOutcome {
    Delivered,
    NotDelivered,
}

impl DeliveryOutcome {
    /// Stored status for this outcome.
    pub fn status(&self) -> DeliveryStatus {
        match self {
            DeliveryOutcome::Delivered => DeliveryStatus::Delivered,
            DeliveryOutcome::NotDelivered => DeliveryStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RecordOutcomeRequest {
    pub outcome: DeliveryOutcome,
}
