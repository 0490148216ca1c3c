use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::auth::extractors::{RoleRequired, DELIVERY_STAFF};
use shared_types::{AppError, CustomerSummary, Delivery, RecordOutcomeRequest};

#[utoipa::path(
    get,
    path = "/api/partner/customers",
    responses(
        (status = 200, description = "Customers, newest first", body = Vec<CustomerSummary>),
        (status = 403, description = "Delivery partner role required", body = AppError)
    ),
    tag = "deliveries",
    security(("bearer_auth" = []))
)]
pub async fn list_partner_customers(
    State(pool): State<Pool<Postgres>>,
    _staff: RoleRequired<DELIVERY_STAFF>,
) -> Result<Json<Vec<CustomerSummary>>, AppError> {
    Ok(Json(crate::repo::customer::list_with_profiles(&pool).await?))
}

#[utoipa::path(
    get,
    path = "/api/customers/{id}/deliveries",
    params(("id" = Uuid, Path, description = "Customer id")),
    responses(
        (status = 200, description = "Deliveries, latest first", body = Vec<Delivery>),
        (status = 404, description = "Customer not found", body = AppError)
    ),
    tag = "deliveries",
    security(("bearer_auth" = []))
)]
pub async fn list_customer_deliveries(
    State(pool): State<Pool<Postgres>>,
    _staff: RoleRequired<DELIVERY_STAFF>,
    Path(id): Path<Uuid>,
) -> Result<Json<Vec<Delivery>>, AppError> {
    Ok(Json(crate::dashboard::customer_deliveries(&pool, id).await?))
}

#[utoipa::path(
    patch,
    path = "/api/deliveries/{id}/outcome",
    params(("id" = Uuid, Path, description = "Delivery id")),
    request_body = RecordOutcomeRequest,
    responses(
        (status = 200, description = "Outcome recorded", body = Delivery),
        (status = 404, description = "Delivery not found", body = AppError)
    ),
    tag = "deliveries",
    security(("bearer_auth" = []))
)]
#[tracing::instrument(skip(pool, staff, body))]
pub async fn record_outcome(
    State(pool): State<Pool<Postgres>>,
    staff: RoleRequired<DELIVERY_STAFF>,
    Path(id): Path<Uuid>,
    Json(body): Json<RecordOutcomeRequest>,
) -> Result<Json<Delivery>, AppError> {
    let delivery =
        crate::dashboard::record_outcome(&pool, id, body.outcome, staff.claims.sub).await?;
    Ok(Json(delivery))
}
