use shared_types::{AppError, Role, RoleRow};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// The user's role row, if any. Read-only.
pub async fn find_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Option<RoleRow>, AppError> {
    sqlx::query_as::<_, RoleRow>("SELECT user_id, role FROM user_roles WHERE user_id = $1")
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)
}

/// Insert a role row. Fails with `Conflict` if the user already has one.
pub async fn insert(conn: &mut PgConnection, user_id: Uuid, role: Role) -> Result<(), AppError> {
    sqlx::query("INSERT INTO user_roles (id, user_id, role) VALUES ($1, $2, $3)")
        .bind(Uuid::new_v4())
        .bind(user_id)
        .bind(role.as_str())
        .execute(conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}

/// Insert or replace the user's role.
pub async fn assign(pool: &Pool<Postgres>, user_id: Uuid, role: Role) -> Result<(), AppError> {
    sqlx::query(
        r#"
        INSERT INTO user_roles (id, user_id, role)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id) DO UPDATE SET role = EXCLUDED.role
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(role.as_str())
    .execute(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}
