use axum::{extract::State, Json};
use sqlx::{Pool, Postgres};

use crate::auth::extractors::AuthRequired;
use shared_types::{AppError, CustomerOverview};

/// GET /api/me/subscription
#[utoipa::path(
    get,
    path = "/api/me/subscription",
    responses(
        (status = 200, description = "Subscription and delivery history", body = CustomerOverview),
        (status = 401, description = "Not authenticated", body = AppError)
    ),
    tag = "customers",
    security(("bearer_auth" = []))
)]
pub async fn get_my_subscription(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
) -> Result<Json<CustomerOverview>, AppError> {
    Ok(Json(crate::dashboard::customer_overview(&pool, auth.0.sub).await?))
}
