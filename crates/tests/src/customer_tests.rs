use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn customer_sees_their_subscription_and_history() {
    let (app, pool, _guard) = common::test_app().await;
    let customer = common::seed_customer(&pool, "juniper").await;
    let partner = common::seed_partner(&pool).await;

    let older = common::seed_delivery(&pool, customer.id, common::date(2026, 3, 1)).await;
    common::seed_delivery(&pool, customer.id, common::date(2026, 3, 8)).await;
    common::patch_json_authed(
        &app,
        &format!("/api/deliveries/{}/outcome", older.id),
        r#"{"outcome":"delivered"}"#,
        &partner.token,
    )
    .await;

    let email = format!("juniper@{}", server::config::login_email_domain());
    let token = common::token_for(customer.user_id, &email);
    let (status, response) = common::get_authed(&app, "/api/me/subscription", &token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["subscription"]["id"], customer.id.to_string());
    assert_eq!(response["subscription"]["subscription_status"], "active");
    let deliveries = response["deliveries"].as_array().unwrap();
    assert_eq!(deliveries.len(), 2);
    // Newest first.
    assert_eq!(deliveries[0]["delivery_date"], "2026-03-08");
    assert_eq!(deliveries[1]["delivery_status"], "delivered");
}

#[tokio::test]
async fn user_without_a_customer_record_gets_an_empty_overview() {
    let (app, pool, _guard) = common::test_app().await;
    let user = common::seed_user(&pool, "browser@fruitunion.local", None).await;

    let (status, response) = common::get_authed(&app, "/api/me/subscription", &user.token).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response["subscription"].is_null());
    assert_eq!(response["deliveries"], serde_json::json!([]));
}

#[tokio::test]
async fn subscription_requires_authentication() {
    let (app, _pool, _guard) = common::test_app().await;

    let (status, _) = common::get(&app, "/api/me/subscription").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
