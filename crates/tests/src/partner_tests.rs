use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn partner_lists_customers_with_addresses() {
    let (app, pool, _guard) = common::test_app().await;
    let partner = common::seed_partner(&pool).await;
    common::seed_customer(&pool, "mango").await;
    common::seed_customer(&pool, "nectarine").await;

    let (status, response) = common::get_authed(&app, "/api/partner/customers", &partner.token).await;

    assert_eq!(status, StatusCode::OK);
    let list = response.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert!(list.iter().all(|c| c["delivery_address"].as_str().is_some_and(|a| !a.is_empty())));
}

#[tokio::test]
async fn partner_sees_a_customers_deliveries() {
    let (app, pool, _guard) = common::test_app().await;
    let partner = common::seed_partner(&pool).await;
    let customer = common::seed_customer(&pool, "olive").await;
    common::seed_delivery(&pool, customer.id, common::date(2026, 6, 1)).await;

    let (status, response) = common::get_authed(
        &app,
        &format!("/api/customers/{}/deliveries", customer.id),
        &partner.token,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response.as_array().unwrap().len(), 1);
    assert_eq!(response[0]["items"], "6 apples, 4 pears");
}

#[tokio::test]
async fn deliveries_of_unknown_customer_are_not_found() {
    let (app, pool, _guard) = common::test_app().await;
    let partner = common::seed_partner(&pool).await;

    let (status, _) = common::get_authed(
        &app,
        &format!("/api/customers/{}/deliveries", uuid::Uuid::new_v4()),
        &partner.token,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delivered_outcome_stamps_time_and_assigns_partner() {
    let (app, pool, _guard) = common::test_app().await;
    let partner = common::seed_partner(&pool).await;
    let customer = common::seed_customer(&pool, "papaya").await;
    let delivery = common::seed_delivery(&pool, customer.id, common::date(2026, 6, 2)).await;

    let (status, updated) = common::patch_json_authed(
        &app,
        &format!("/api/deliveries/{}/outcome", delivery.id),
        r#"{"outcome":"delivered"}"#,
        &partner.token,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["delivery_status"], "delivered");
    assert!(updated["delivered_at"].is_string());

    let partner_row: uuid::Uuid =
        sqlx::query_scalar("SELECT id FROM delivery_partners WHERE user_id = $1")
            .bind(partner.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(updated["delivery_partner_id"], partner_row.to_string());
}

#[tokio::test]
async fn not_delivered_marks_failed_and_clears_stamp() {
    let (app, pool, _guard) = common::test_app().await;
    let partner = common::seed_partner(&pool).await;
    let customer = common::seed_customer(&pool, "quince").await;
    let delivery = common::seed_delivery(&pool, customer.id, common::date(2026, 6, 3)).await;
    let uri = format!("/api/deliveries/{}/outcome", delivery.id);

    common::patch_json_authed(&app, &uri, r#"{"outcome":"delivered"}"#, &partner.token).await;
    let (status, updated) =
        common::patch_json_authed(&app, &uri, r#"{"outcome":"not_delivered"}"#, &partner.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["delivery_status"], "failed");
    assert!(updated["delivered_at"].is_null());
}

#[tokio::test]
async fn admins_may_record_outcomes_too() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;
    let customer = common::seed_customer(&pool, "raisin").await;
    let delivery = common::seed_delivery(&pool, customer.id, common::date(2026, 6, 4)).await;

    let (status, updated) = common::patch_json_authed(
        &app,
        &format!("/api/deliveries/{}/outcome", delivery.id),
        r#"{"outcome":"delivered"}"#,
        &admin.token,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(updated["delivery_partner_id"].is_null());
}

#[tokio::test]
async fn unknown_delivery_outcome_is_not_found() {
    let (app, pool, _guard) = common::test_app().await;
    let partner = common::seed_partner(&pool).await;

    let (status, _) = common::patch_json_authed(
        &app,
        &format!("/api/deliveries/{}/outcome", uuid::Uuid::new_v4()),
        r#"{"outcome":"delivered"}"#,
        &partner.token,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customers_cannot_record_outcomes() {
    let (app, pool, _guard) = common::test_app().await;
    let customer = common::seed_customer(&pool, "satsuma").await;
    let delivery = common::seed_delivery(&pool, customer.id, common::date(2026, 6, 5)).await;
    let email = format!("satsuma@{}", server::config::login_email_domain());
    let token = common::token_for(customer.user_id, &email);

    let (status, _) = common::patch_json_authed(
        &app,
        &format!("/api/deliveries/{}/outcome", delivery.id),
        r#"{"outcome":"delivered"}"#,
        &token,
    )
    .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
