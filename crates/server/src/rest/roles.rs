use axum::{
    extract::{Path, State},
    Json,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::auth::extractors::AuthRequired;
use shared_types::{AppError, RoleRow};

/// GET /api/users/{user_id}/role
///
/// `null` when the user has no role row; clients treat that as customer.
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/role",
    params(("user_id" = Uuid, Path, description = "User id")),
    responses(
        (status = 200, description = "Role row, or null", body = Option<RoleRow>),
        (status = 401, description = "Not authenticated", body = AppError),
        (status = 403, description = "Not your role and not an admin", body = AppError)
    ),
    tag = "roles",
    security(("bearer_auth" = []))
)]
pub async fn get_user_role(
    State(pool): State<Pool<Postgres>>,
    auth: AuthRequired,
    Path(user_id): Path<Uuid>,
) -> Result<Json<Option<RoleRow>>, AppError> {
    let row = crate::auth::role_row_for(&pool, auth.0.sub, user_id).await?;
    Ok(Json(row))
}
