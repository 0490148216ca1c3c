use shared_types::{AdminStats, AppError, ACTIVE_DELIVERY_STATUSES};
use sqlx::{Pool, Postgres};

use crate::error_convert::SqlxErrorExt;

pub async fn admin_stats(pool: &Pool<Postgres>) -> Result<AdminStats, AppError> {
    let active: Vec<&str> = ACTIVE_DELIVERY_STATUSES.iter().map(|s| s.as_str()).collect();

    let (total_customers, total_deliveries, total_partners, active_deliveries) =
        sqlx::query_as::<_, (i64, i64, i64, i64)>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM customers),
                (SELECT COUNT(*) FROM deliveries),
                (SELECT COUNT(*) FROM delivery_partners),
                (SELECT COUNT(*) FROM deliveries WHERE delivery_status = ANY($1))
            "#,
        )
        .bind(&active)
        .fetch_one(pool)
        .await
        .map_err(SqlxErrorExt::into_app_error)?;

    Ok(AdminStats {
        total_customers,
        active_deliveries,
        total_deliveries,
        total_partners,
    })
}
