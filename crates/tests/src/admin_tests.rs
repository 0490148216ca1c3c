use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn stats_count_customers_deliveries_and_partners() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;
    let partner = common::seed_partner(&pool).await;
    let a = common::seed_customer(&pool, "apricot").await;
    let b = common::seed_customer(&pool, "banana").await;

    let done = common::seed_delivery(&pool, a.id, common::date(2026, 4, 1)).await;
    common::seed_delivery(&pool, a.id, common::date(2026, 4, 8)).await;
    common::seed_delivery(&pool, b.id, common::date(2026, 4, 8)).await;
    common::patch_json_authed(
        &app,
        &format!("/api/deliveries/{}/outcome", done.id),
        r#"{"outcome":"delivered"}"#,
        &partner.token,
    )
    .await;

    let (status, response) = common::get_authed(&app, "/api/admin/stats", &admin.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["total_customers"], 2);
    assert_eq!(response["total_deliveries"], 3);
    assert_eq!(response["active_deliveries"], 2);
    assert_eq!(response["total_partners"], 1);
}

#[tokio::test]
async fn add_customer_creates_login_role_and_subscription() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;

    let body = r#"{
        "full_name": "Clementine Grove",
        "username": "clementine",
        "password": "citrus-season-1",
        "phone": "555-0199",
        "subscription_plan": "quarterly",
        "subscription_status": "active",
        "delivery_address": "12 Orchard Row"
    }"#;
    let (status, created) =
        common::post_json_authed(&app, "/api/admin/customers", body, &admin.token).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["full_name"], "Clementine Grove");
    assert_eq!(created["subscription_plan"], "quarterly");
    assert_eq!(created["delivery_address"], "12 Orchard Row");

    let role: String = sqlx::query_scalar(
        "SELECT r.role FROM user_roles r JOIN customers c ON c.user_id = r.user_id WHERE c.id = $1",
    )
    .bind(uuid::Uuid::parse_str(created["id"].as_str().unwrap()).unwrap())
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(role, "customer");

    // The new customer can sign in with the username.
    let (status, _) = common::post_json(
        &app,
        "/api/auth/sign-in",
        r#"{"login":"clementine","password":"citrus-season-1"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = common::get_authed(&app, "/api/admin/customers", &admin.token).await;
    let list = list.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["phone"], "555-0199");
}

#[tokio::test]
async fn first_period_is_thirty_days() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;

    let body = serde_json::to_string(&common::customer_request(
        "damson",
        shared_types::SubscriptionStatus::Inactive,
    ))
    .unwrap();
    let (_, created) = common::post_json_authed(&app, "/api/admin/customers", &body, &admin.token).await;

    let today = chrono::Utc::now().date_naive();
    let expected = (today + chrono::Duration::days(30)).to_string();
    assert_eq!(created["subscription_end_date"], expected);
    assert_eq!(created["next_payment_date"], expected);
    assert_eq!(created["subscription_status"], "inactive");
}

#[tokio::test]
async fn duplicate_username_conflicts_and_leaves_no_partial_rows() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;
    common::seed_customer(&pool, "elder").await;

    let body = serde_json::to_string(&common::customer_request(
        "elder",
        shared_types::SubscriptionStatus::Active,
    ))
    .unwrap();
    let (status, _) = common::post_json_authed(&app, "/api/admin/customers", &body, &admin.token).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let customers: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM customers")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(customers, 1);
}

#[tokio::test]
async fn add_customer_with_missing_fields_is_rejected() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;

    let mut req = common::customer_request("fig", shared_types::SubscriptionStatus::Active);
    req.full_name = String::new();
    req.password = String::new();
    let body = serde_json::to_string(&req).unwrap();

    let (status, response) =
        common::post_json_authed(&app, "/api/admin/customers", &body, &admin.token).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["field_errors"]["full_name"].is_string());
    assert!(response["field_errors"]["password"].is_string());
}

#[tokio::test]
async fn subscription_status_can_be_toggled() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;
    let customer = common::seed_customer(&pool, "guava").await;

    let (status, updated) = common::patch_json_authed(
        &app,
        &format!("/api/admin/customers/{}/subscription", customer.id),
        r#"{"subscription_status":"inactive"}"#,
        &admin.token,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["subscription_status"], "inactive");
}

#[tokio::test]
async fn unknown_customer_subscription_is_not_found() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;

    let (status, _) = common::patch_json_authed(
        &app,
        &format!("/api/admin/customers/{}/subscription", uuid::Uuid::new_v4()),
        r#"{"subscription_status":"active"}"#,
        &admin.token,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn scheduled_delivery_defaults_to_the_customer_address() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;
    let customer = common::seed_customer(&pool, "huckleberry").await;

    let body = format!(
        r#"{{"customer_id":"{}","delivery_date":"2026-05-02","items":"1 kg cherries","delivery_address":"  "}}"#,
        customer.id
    );
    let (status, delivery) =
        common::post_json_authed(&app, "/api/admin/deliveries", &body, &admin.token).await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(delivery["delivery_status"], "pending");
    assert_eq!(delivery["delivery_address"], customer.delivery_address);
    assert!(delivery["delivered_at"].is_null());
}

#[tokio::test]
async fn delivery_for_unknown_customer_is_not_found() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;

    let body = format!(
        r#"{{"customer_id":"{}","delivery_date":"2026-05-02","items":"plums"}}"#,
        uuid::Uuid::new_v4()
    );
    let (status, _) = common::post_json_authed(&app, "/api/admin/deliveries", &body, &admin.token).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn non_admins_cannot_use_admin_routes() {
    let (app, pool, _guard) = common::test_app().await;
    let partner = common::seed_partner(&pool).await;
    let customer = common::seed_user(&pool, "kiwi@fruitunion.local", Some("customer")).await;
    let unknown = common::seed_user(&pool, "lime@fruitunion.local", Some("manager")).await;

    for user in [&partner, &customer, &unknown] {
        let (status, _) = common::get_authed(&app, "/api/admin/stats", &user.token).await;
        assert_eq!(status, StatusCode::FORBIDDEN, "{}", user.email);
    }

    let (status, response) = common::get_authed(&app, "/api/admin/customers", &unknown.token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(response["message"], "Invalid user role. Please contact support.");
}

#[tokio::test]
async fn admin_routes_require_authentication() {
    let (app, _pool, _guard) = common::test_app().await;

    let (status, _) = common::get(&app, "/api/admin/customers").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
