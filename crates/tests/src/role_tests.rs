use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn user_without_a_role_row_gets_null() {
    let (app, pool, _guard) = common::test_app().await;
    let user = common::seed_user(&pool, "plain@fruitunion.local", None).await;

    let (status, response) =
        common::get_authed(&app, &format!("/api/users/{}/role", user.id), &user.token).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.is_null());
}

#[tokio::test]
async fn own_role_row_is_returned_verbatim() {
    let (app, pool, _guard) = common::test_app().await;

    for raw in ["admin", "delivery_partner", "customer", "manager"] {
        let user = common::seed_user(&pool, &format!("{raw}@fruitunion.local"), Some(raw)).await;
        let (status, response) =
            common::get_authed(&app, &format!("/api/users/{}/role", user.id), &user.token).await;

        assert_eq!(status, StatusCode::OK, "{raw}");
        assert_eq!(response["role"], raw);
        assert_eq!(response["user_id"], user.id.to_string());
    }
}

#[tokio::test]
async fn looking_up_someone_else_is_forbidden() {
    let (app, pool, _guard) = common::test_app().await;
    let me = common::seed_user(&pool, "me@fruitunion.local", Some("customer")).await;
    let other = common::seed_partner(&pool).await;

    let (status, _) =
        common::get_authed(&app, &format!("/api/users/{}/role", other.id), &me.token).await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn admin_may_look_up_any_user() {
    let (app, pool, _guard) = common::test_app().await;
    let admin = common::seed_admin(&pool).await;
    let partner = common::seed_partner(&pool).await;

    let (status, response) =
        common::get_authed(&app, &format!("/api/users/{}/role", partner.id), &admin.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["role"], "delivery_partner");
}

#[tokio::test]
async fn role_lookup_requires_authentication() {
    let (app, pool, _guard) = common::test_app().await;
    let user = common::seed_user(&pool, "plain@fruitunion.local", None).await;

    let (status, _) = common::get(&app, &format!("/api/users/{}/role", user.id)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn role_rows_of_others_are_refused_before_they_are_read() {
    let (_app, pool, _guard) = common::test_app().await;
    let partner = common::seed_partner(&pool).await;
    let customer = common::seed_user(&pool, "buyer@fruitunion.local", Some("customer")).await;
    let admin = common::seed_admin(&pool).await;

    let refused = server::auth::role_row_for(&pool, customer.id, partner.id).await;
    assert_eq!(
        refused.unwrap_err().kind,
        shared_types::AppErrorKind::Forbidden
    );

    let seen = server::auth::role_row_for(&pool, admin.id, partner.id)
        .await
        .unwrap()
        .expect("partner has a role row");
    assert_eq!(seen.role, "delivery_partner");
}
