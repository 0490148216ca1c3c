use serde::{Deserialize, Serialize};

/// Counters shown on the admin dashboard.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AdminStats {
    pub total_customers: i64,
    pub active_deliveries: i64,
    pub total_deliveries: i64,
    pub total_partners: i64,
}
