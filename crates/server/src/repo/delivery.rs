use chrono::{DateTime, NaiveDate, Utc};
use shared_types::{AppError, Delivery, DeliveryStatus};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

const DELIVERY_COLUMNS: &str = "id, customer_id, delivery_partner_id, delivery_date, \
     delivery_status, items, delivery_address, delivered_at, created_at";

pub async fn create(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
    delivery_date: NaiveDate,
    items: &str,
    delivery_address: &str,
) -> Result<Delivery, AppError> {
    sqlx::query_as::<_, Delivery>(&format!(
        r#"
        INSERT INTO deliveries (id, customer_id, delivery_date, delivery_status, items, delivery_address)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {DELIVERY_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(customer_id)
    .bind(delivery_date)
    .bind(DeliveryStatus::Pending.as_str())
    .bind(items)
    .bind(delivery_address)
    .fetch_one(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Deliveries for one customer, latest delivery date first.
pub async fn list_by_customer(
    pool: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Vec<Delivery>, AppError> {
    sqlx::query_as::<_, Delivery>(&format!(
        "SELECT {DELIVERY_COLUMNS} FROM deliveries WHERE customer_id = $1 \
         ORDER BY delivery_date DESC, created_at DESC"
    ))
    .bind(customer_id)
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// Set the status and delivery timestamp. `delivered_at` is `None` for any
/// status other than delivered. A `partner_id` records who handled it;
/// `None` keeps the current assignment.
pub async fn set_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: DeliveryStatus,
    delivered_at: Option<DateTime<Utc>>,
    partner_id: Option<Uuid>,
) -> Result<Option<Delivery>, AppError> {
    sqlx::query_as::<_, Delivery>(&format!(
        "UPDATE deliveries \
         SET delivery_status = $2, delivered_at = $3, \
             delivery_partner_id = COALESCE($4, delivery_partner_id) \
         WHERE id = $1 \
         RETURNING {DELIVERY_COLUMNS}"
    ))
    .bind(id)
    .bind(status.as_str())
    .bind(delivered_at)
    .bind(partner_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
