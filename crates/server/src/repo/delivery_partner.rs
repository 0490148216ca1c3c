use shared_types::AppError;
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Register a user as a delivery partner and return the partner id.
pub async fn create(conn: &mut PgConnection, user_id: Uuid) -> Result<Uuid, AppError> {
    sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO delivery_partners (id, user_id) VALUES ($1, $2) RETURNING id",
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .fetch_one(conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_id_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Option<Uuid>, AppError> {
    sqlx::query_scalar::<_, Uuid>("SELECT id FROM delivery_partners WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}
