use chrono::NaiveDate;
use shared_types::{AppError, Customer, CustomerSummary, SubscriptionPlan, SubscriptionStatus};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use crate::error_convert::SqlxErrorExt;

const CUSTOMER_COLUMNS: &str = "id, user_id, subscription_plan, subscription_status, \
     subscription_start_date, subscription_end_date, next_payment_date, delivery_address, created_at";

/// Fields of a new `customers` row.
#[derive(Debug, Clone)]
pub struct NewCustomer<'a> {
    pub user_id: Uuid,
    pub plan: SubscriptionPlan,
    pub status: SubscriptionStatus,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub next_payment_date: NaiveDate,
    pub delivery_address: &'a str,
}

pub async fn create(conn: &mut PgConnection, new: NewCustomer<'_>) -> Result<Customer, AppError> {
    sqlx::query_as::<_, Customer>(&format!(
        r#"
        INSERT INTO customers
            (id, user_id, subscription_plan, subscription_status,
             subscription_start_date, subscription_end_date, next_payment_date, delivery_address)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING {CUSTOMER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new.user_id)
    .bind(new.plan.as_str())
    .bind(new.status.as_str())
    .bind(new.start_date)
    .bind(new.end_date)
    .bind(new.next_payment_date)
    .bind(new.delivery_address)
    .fetch_one(conn)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_id(pool: &Pool<Postgres>, id: Uuid) -> Result<Option<Customer>, AppError> {
    sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn find_by_user(
    pool: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Option<Customer>, AppError> {
    sqlx::query_as::<_, Customer>(&format!(
        "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE user_id = $1"
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

/// All customers with their profile, newest first.
pub async fn list_with_profiles(pool: &Pool<Postgres>) -> Result<Vec<CustomerSummary>, AppError> {
    sqlx::query_as::<_, CustomerSummary>(
        r#"
        SELECT c.id, c.user_id,
               COALESCE(p.full_name, '') AS full_name, p.phone,
               c.subscription_plan, c.subscription_status,
               c.subscription_end_date, c.next_payment_date, c.delivery_address
        FROM customers c
        LEFT JOIN profiles p ON p.id = c.user_id
        ORDER BY c.created_at DESC
        "#,
    )
    .fetch_all(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}

pub async fn update_status(
    pool: &Pool<Postgres>,
    id: Uuid,
    status: SubscriptionStatus,
) -> Result<Option<Customer>, AppError> {
    sqlx::query_as::<_, Customer>(&format!(
        "UPDATE customers SET subscription_status = $2 WHERE id = $1 RETURNING {CUSTOMER_COLUMNS}"
    ))
    .bind(id)
    .bind(status.as_str())
    .fetch_optional(pool)
    .await
    .map_err(SqlxErrorExt::into_app_error)
}
