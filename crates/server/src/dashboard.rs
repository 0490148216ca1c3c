//! Operations behind the role dashboards, shared by the server functions and
//! the REST handlers. Callers check roles first.

use chrono::{NaiveDate, Utc};
use shared_types::{
    initial_period, AppError, CreateCustomerRequest, CreateDeliveryRequest, CustomerOverview,
    CustomerSummary, Delivery, DeliveryOutcome, DeliveryStatus, Role,
};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

use crate::auth::{account, normalize_login};
use crate::error_convert::{SqlxErrorExt, ValidateRequest};
use crate::repo;

/// Create the login, profile, `customer` role row and subscription of a new
/// customer in one transaction. The first period starts on `today` and ends,
/// with the first payment due, thirty days later.
pub async fn add_customer(
    db: &Pool<Postgres>,
    req: &CreateCustomerRequest,
    today: NaiveDate,
) -> Result<CustomerSummary, AppError> {
    req.validate_request()?;

    let email = normalize_login(&req.username, &crate::config::login_email_domain());
    let (start_date, end_date, next_payment_date) = initial_period(today);

    let mut tx = db.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let user = account::create_account(
        &mut tx,
        &email,
        &req.password,
        &req.full_name,
        req.phone.as_deref(),
    )
    .await?;
    repo::user_role::insert(&mut tx, user.id, Role::Customer).await?;
    let customer = repo::customer::create(
        &mut tx,
        repo::customer::NewCustomer {
            user_id: user.id,
            plan: req.subscription_plan,
            status: req.subscription_status,
            start_date,
            end_date,
            next_payment_date,
            delivery_address: req.delivery_address.trim(),
        },
    )
    .await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    tracing::info!(customer_id = %customer.id, user_id = %user.id, "customer added");

    Ok(CustomerSummary {
        id: customer.id,
        user_id: user.id,
        full_name: req.full_name.trim().to_string(),
        phone: req.phone.clone().filter(|p| !p.trim().is_empty()),
        subscription_plan: customer.subscription_plan,
        subscription_status: customer.subscription_status,
        subscription_end_date: customer.subscription_end_date,
        next_payment_date: customer.next_payment_date,
        delivery_address: customer.delivery_address,
    })
}

/// Schedule a pending delivery. A blank address falls back to the
/// customer's delivery address.
pub async fn schedule_delivery(
    db: &Pool<Postgres>,
    req: &CreateDeliveryRequest,
) -> Result<Delivery, AppError> {
    req.validate_request()?;

    let customer = repo::customer::find_by_id(db, req.customer_id)
        .await?
        .ok_or_else(|| AppError::not_found("Customer not found"))?;

    let address = req
        .delivery_address
        .as_deref()
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .unwrap_or(&customer.delivery_address);

    let delivery =
        repo::delivery::create(db, customer.id, req.delivery_date, req.items.trim(), address).await?;
    tracing::info!(delivery_id = %delivery.id, customer_id = %customer.id, "delivery scheduled");
    Ok(delivery)
}

pub async fn customer_deliveries(
    db: &Pool<Postgres>,
    customer_id: Uuid,
) -> Result<Vec<Delivery>, AppError> {
    if repo::customer::find_by_id(db, customer_id).await?.is_none() {
        return Err(AppError::not_found("Customer not found"));
    }
    repo::delivery::list_by_customer(db, customer_id).await
}

/// Record what happened to a delivery. Delivered stamps `delivered_at`;
/// not delivered marks it failed and clears the stamp.
pub async fn record_outcome(
    db: &Pool<Postgres>,
    delivery_id: Uuid,
    outcome: DeliveryOutcome,
    recorded_by: Uuid,
) -> Result<Delivery, AppError> {
    let status = outcome.status();
    let delivered_at = (status == DeliveryStatus::Delivered).then(Utc::now);
    let partner_id = repo::delivery_partner::find_id_by_user(db, recorded_by).await?;

    let delivery = repo::delivery::set_status(db, delivery_id, status, delivered_at, partner_id)
        .await?
        .ok_or_else(|| AppError::not_found("Delivery not found"))?;
    tracing::info!(%delivery_id, status = status.as_str(), "delivery outcome recorded");
    Ok(delivery)
}

/// The signed-in user's subscription and delivery history. A user without a
/// customer record gets an empty overview rather than an error.
pub async fn customer_overview(
    db: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<CustomerOverview, AppError> {
    let Some(subscription) = repo::customer::find_by_user(db, user_id).await? else {
        return Ok(CustomerOverview::default());
    };
    let deliveries = repo::delivery::list_by_customer(db, subscription.id).await?;
    Ok(CustomerOverview {
        subscription: Some(subscription),
        deliveries,
    })
}
