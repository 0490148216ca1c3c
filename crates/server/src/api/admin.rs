use dioxus::prelude::*;
use shared_types::{
    AdminStats, CreateCustomerRequest, CreateDeliveryRequest, Customer, CustomerSummary, Delivery,
    SubscriptionStatus,
};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

#[cfg(feature = "server")]
use shared_types::Role;

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_admin_stats() -> Result<AdminStats, ServerFnError> {
    require_role(&[Role::Admin]).await?;
    crate::repo::stats::admin_stats(db().await?)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// All customers with their profiles, newest first.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_customers() -> Result<Vec<CustomerSummary>, ServerFnError> {
    require_role(&[Role::Admin]).await?;
    crate::repo::customer::list_with_profiles(db().await?)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument(skip(req), fields(username = %req.username)))]
#[server]
pub async fn add_customer(req: CreateCustomerRequest) -> Result<CustomerSummary, ServerFnError> {
    require_role(&[Role::Admin]).await?;
    let today = chrono::Utc::now().date_naive();
    crate::dashboard::add_customer(db().await?, &req, today)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_subscription_status(
    customer_id: Uuid,
    status: SubscriptionStatus,
) -> Result<Customer, ServerFnError> {
    use shared_types::AppError;

    require_role(&[Role::Admin]).await?;
    crate::repo::customer::update_status(db().await?, customer_id, status)
        .await
        .map_err(|e| e.into_server_fn_error())?
        .ok_or_else(|| AppError::not_found("Customer not found").into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn schedule_delivery(req: CreateDeliveryRequest) -> Result<Delivery, ServerFnError> {
    require_role(&[Role::Admin]).await?;
    crate::dashboard::schedule_delivery(db().await?, &req)
        .await
        .map_err(|e| e.into_server_fn_error())
}
