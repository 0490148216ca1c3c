use dioxus::prelude::*;
use shared_types::{CustomerSummary, Delivery, DeliveryOutcome};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

/// Customers on the delivery partner dashboard, newest first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_partner_customers() -> Result<Vec<CustomerSummary>, ServerFnError> {
    require_role(STAFF).await?;
    crate::repo::customer::list_with_profiles(db().await?)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// One customer's deliveries, latest delivery date first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_customer_deliveries(customer_id: Uuid) -> Result<Vec<Delivery>, ServerFnError> {
    require_role(STAFF).await?;
    crate::dashboard::customer_deliveries(db().await?, customer_id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn record_delivery_outcome(
    delivery_id: Uuid,
    outcome: DeliveryOutcome,
) -> Result<Delivery, ServerFnError> {
    let claims = require_role(STAFF).await?;
    crate::dashboard::record_outcome(db().await?, delivery_id, outcome, claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())
}
