pub mod delivery_table;
pub mod header;
pub mod invalid_role;
pub mod status_badge;

pub use delivery_table::DeliveryTable;
pub use header::DashboardHeader;
pub use invalid_role::InvalidRoleNotice;
pub use status_badge::{DeliveryStatusBadge, PlanBadge, SubscriptionStatusBadge};
