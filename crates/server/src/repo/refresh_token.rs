use chrono::{DateTime, Utc};
use shared_types::AppError;
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct StoredRefreshToken {
    pub id: Uuid,
    pub revoked: bool,
    pub rotated_at: Option<DateTime<Utc>>,
    pub expires_at: DateTime<Utc>,
}

pub async fn store(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    token_hash: &str,
    expires_at: DateTime<Utc>,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO refresh_tokens (user_id, token_hash, expires_at) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(token_hash)
        .bind(expires_at)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

pub async fn find(
    pool: &Pool<Postgres>,
    user_id: Uuid,
    token_hash: &str,
) -> Result<Option<StoredRefreshToken>, AppError> {
    sqlx::query_as::<_, StoredRefreshToken>(
        "SELECT id, revoked, rotated_at, expires_at FROM refresh_tokens WHERE token_hash = $1 AND user_id = $2",
    )
    .bind(token_hash)
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Mark a token as rotated. The first rotation time is kept, so concurrent
/// refreshes of the same token share one grace window.
pub async fn mark_rotated(pool: &Pool<Postgres>, id: Uuid) -> Result<(), AppError> {
    sqlx::query("UPDATE refresh_tokens SET rotated_at = NOW() WHERE id = $1 AND rotated_at IS NULL")
        .bind(id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

pub async fn revoke_by_hash(pool: &Pool<Postgres>, token_hash: &str) -> Result<(), AppError> {
    sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE token_hash = $1")
        .bind(token_hash)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

pub async fn revoke_all_for_user(pool: &Pool<Postgres>, user_id: Uuid) -> Result<(), AppError> {
    sqlx::query("UPDATE refresh_tokens SET revoked = TRUE WHERE user_id = $1 AND revoked = FALSE")
        .bind(user_id)
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Delete tokens that expired more than a day ago. Returns the number removed.
pub async fn delete_expired(pool: &Pool<Postgres>) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE expires_at < NOW() - INTERVAL '1 day'")
        .execute(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(result.rows_affected())
}
