use shared_types::AppError;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

/// Create the profile row that shares its id with the user.
pub async fn create(
    conn: &mut PgConnection,
    user_id: Uuid,
    full_name: &str,
    phone: Option<&str>,
) -> Result<(), AppError> {
    sqlx::query("INSERT INTO profiles (id, full_name, phone) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind(full_name)
        .bind(phone)
        .execute(conn)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;
    Ok(())
}
