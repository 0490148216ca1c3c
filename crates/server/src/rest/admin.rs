use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::auth::extractors::{RoleRequired, ADMIN};
use shared_types::{
    AdminStats, AppError, CreateCustomerRequest, CreateDeliveryRequest, Customer, CustomerSummary,
    Delivery, UpdateSubscriptionRequest,
};

#[utoipa::path(
    get,
    path = "/api/admin/stats",
    responses(
        (status = 200, description = "Dashboard counters", body = AdminStats),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn get_stats(
    State(pool): State<Pool<Postgres>>,
    _admin: RoleRequired<ADMIN>,
) -> Result<Json<AdminStats>, AppError> {
    Ok(Json(crate::repo::stats::admin_stats(&pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/admin/customers",
    responses(
        (status = 200, description = "Customers, newest first", body = Vec<CustomerSummary>),
        (status = 403, description = "Admin role required", body = AppError)
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn list_customers(
    State(pool): State<Pool<Postgres>>,
    _admin: RoleRequired<ADMIN>,
) -> Result<Json<Vec<CustomerSummary>>, AppError> {
    Ok(Json(crate::repo::customer::list_with_profiles(&pool).await?))
}

#[utoipa::path(
    post,
    path = "/api/admin/customers",
    request_body = CreateCustomerRequest,
    responses(
        (status = 201, description = "Customer created", body = CustomerSummary),
        (status = 409, description = "Username taken", body = AppError),
        (status = 422, description = "Missing fields", body = AppError)
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(pool, admin, body), fields(username = %body.username))]
pub async fn add_customer(
    State(pool): State<Pool<Postgres>>,
    admin: RoleRequired<ADMIN>,
    Json(body): Json<CreateCustomerRequest>,
) -> Result<(StatusCode, Json<CustomerSummary>), AppError> {
    let today = chrono::Utc::now().date_naive();
    let customer = crate::dashboard::add_customer(&pool, &body, today).await?;
    tracing::info!(admin_id = %admin.claims.sub, customer_id = %customer.id, "admin added customer");
    Ok((StatusCode::CREATED, Json(customer)))
}

#[utoipa::path(
    patch,
    path = "/api/admin/customers/{id}/subscription",
    params(("id" = Uuid, Path, description = "Customer id")),
    request_body = UpdateSubscriptionRequest,
    responses(
        (status = 200, description = "Subscription updated", body = Customer),
        (status = 404, description = "Customer not found", body = AppError)
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn update_subscription(
    State(pool): State<Pool<Postgres>>,
    _admin: RoleRequired<ADMIN>,
    Path(id): Path<Uuid>,
    Json(body): Json<UpdateSubscriptionRequest>,
) -> Result<Json<Customer>, AppError> {
    crate::repo::customer::update_status(&pool, id, body.subscription_status)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found(format!("Customer {id} not found")))
}

#[utoipa::path(
    post,
    path = "/api/admin/deliveries",
    request_body = CreateDeliveryRequest,
    responses(
        (status = 201, description = "Delivery scheduled", body = Delivery),
        (status = 404, description = "Customer not found", body = AppError),
        (status = 422, description = "Missing fields", body = AppError)
    ),
    tag = "admin",
    security(("bearer_auth" = []))
)]
pub async fn schedule_delivery(
    State(pool): State<Pool<Postgres>>,
    _admin: RoleRequired<ADMIN>,
    Json(body): Json<CreateDeliveryRequest>,
) -> Result<(StatusCode, Json<Delivery>), AppError> {
    let delivery = crate::dashboard::schedule_delivery(&pool, &body).await?;
    Ok((StatusCode::CREATED, Json(delivery)))
}
