use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use crate::common;

#[tokio::test]
async fn sign_in_returns_session_and_sets_cookies() {
    let (app, pool, _guard) = common::test_app().await;
    let user = common::seed_user(&pool, "grower@fruitunion.local", None).await;

    let body = format!(
        r#"{{"login":"grower@fruitunion.local","password":"{}"}}"#,
        common::TEST_PASSWORD
    );
    let (status, headers, response) =
        common::post_json_with_headers(&app, "/api/auth/sign-in", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["session"]["user"]["id"], user.id.to_string());
    assert_eq!(response["session"]["user"]["email"], "grower@fruitunion.local");
    assert!(response["access_token"].as_str().is_some_and(|t| !t.is_empty()));

    let cookies = common::set_cookies(&headers);
    assert!(cookies.iter().any(|c| c.starts_with("fu_access=")));
    assert!(cookies.iter().any(|c| c.starts_with("fu_refresh=") && c.contains("HttpOnly")));
}

#[tokio::test]
async fn sign_in_accepts_a_bare_username() {
    let (app, pool, _guard) = common::test_app().await;
    let email = format!("picker@{}", server::config::login_email_domain());
    common::seed_user(&pool, &email, None).await;

    let body = format!(r#"{{"login":"  Picker ","password":"{}"}}"#, common::TEST_PASSWORD);
    let (status, response) = common::post_json(&app, "/api/auth/sign-in", &body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["session"]["user"]["email"], email);
}

#[tokio::test]
async fn wrong_password_is_unauthorized() {
    let (app, pool, _guard) = common::test_app().await;
    common::seed_user(&pool, "grower@fruitunion.local", None).await;

    let body = r#"{"login":"grower@fruitunion.local","password":"not-it"}"#;
    let (status, response) = common::post_json(&app, "/api/auth/sign-in", body).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["message"], "Invalid email or password");
}

#[tokio::test]
async fn unknown_account_gets_the_same_error_as_a_wrong_password() {
    let (app, _pool, _guard) = common::test_app().await;

    let body = r#"{"login":"nobody@fruitunion.local","password":"whatever"}"#;
    let (status, response) = common::post_json(&app, "/api/auth/sign-in", body).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(response["message"], "Invalid email or password");
}

#[tokio::test]
async fn blank_credentials_fail_validation() {
    let (app, _pool, _guard) = common::test_app().await;

    let (status, response) =
        common::post_json(&app, "/api/auth/sign-in", r#"{"login":"","password":""}"#).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(response["field_errors"]["login"].is_string());
    assert!(response["field_errors"]["password"].is_string());
}

#[tokio::test]
async fn sign_up_is_forbidden_while_self_signup_is_off() {
    let (app, pool, _guard) = common::test_app().await;

    let body = r#"{"full_name":"New Person","login":"newbie","password":"long-enough-pw"}"#;
    let (status, _) = common::post_json(&app, "/api/auth/sign-up", body).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn session_is_null_without_credentials() {
    let (app, _pool, _guard) = common::test_app().await;

    let (status, response) = common::get(&app, "/api/auth/session").await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.is_null());
}

#[tokio::test]
async fn session_reports_the_token_identity() {
    let (app, pool, _guard) = common::test_app().await;
    let user = common::seed_user(&pool, "grower@fruitunion.local", None).await;

    let (status, response) = common::get_authed(&app, "/api/auth/session", &user.token).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(response["user"]["id"], user.id.to_string());
    assert!(response["session_id"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn garbage_bearer_token_is_treated_as_signed_out() {
    let (app, _pool, _guard) = common::test_app().await;

    let (status, response) = common::get_authed(&app, "/api/auth/session", "not-a-jwt").await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.is_null());
}

#[tokio::test]
async fn sign_out_clears_cookies_and_revokes_refresh_tokens() {
    let (app, pool, _guard) = common::test_app().await;
    common::seed_user(&pool, "grower@fruitunion.local", None).await;

    let body = format!(
        r#"{{"login":"grower@fruitunion.local","password":"{}"}}"#,
        common::TEST_PASSWORD
    );
    let (_, signed_in) = common::post_json(&app, "/api/auth/sign-in", &body).await;
    let token = signed_in["access_token"].as_str().unwrap().to_string();

    let (status, headers, _) =
        common::post_authed_with_headers(&app, "/api/auth/sign-out", &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(common::set_cookies(&headers)
        .iter()
        .any(|c| c.starts_with("fu_refresh=") && c.contains("Max-Age=0")));

    let live: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens WHERE revoked = FALSE")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(live, 0);
}

#[tokio::test]
async fn sign_out_when_already_signed_out_still_succeeds() {
    let (app, _pool, _guard) = common::test_app().await;

    let (status, _) = common::post_json(&app, "/api/auth/sign-out", "{}").await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn concurrent_session_checks_with_one_refresh_cookie_both_see_the_session() {
    let (app, pool, _guard) = common::test_app().await;
    let user = common::seed_user(&pool, "race@fruitunion.local", None).await;
    let cookie = format!("fu_refresh={}", common::refresh_token_for(&pool, &user).await);

    let (a, b) = tokio::join!(
        common::get_with_cookie(&app, "/api/auth/session", &cookie),
        common::get_with_cookie(&app, "/api/auth/session", &cookie),
    );

    assert_eq!(a.0, StatusCode::OK);
    assert_eq!(b.0, StatusCode::OK);
    assert_eq!(a.1["user"]["email"], "race@fruitunion.local");
    assert_eq!(b.1["user"]["email"], "race@fruitunion.local");
}

#[tokio::test]
async fn rotated_refresh_cookie_still_works_inside_the_grace_window() {
    let (app, pool, _guard) = common::test_app().await;
    let user = common::seed_user(&pool, "grower@fruitunion.local", None).await;
    let cookie = format!("fu_refresh={}", common::refresh_token_for(&pool, &user).await);

    let (_, first) = common::get_with_cookie(&app, "/api/auth/session", &cookie).await;
    let (_, second) = common::get_with_cookie(&app, "/api/auth/session", &cookie).await;

    assert_eq!(first["user"]["id"], user.id.to_string());
    assert_eq!(second["user"]["id"], user.id.to_string());
}

#[tokio::test]
async fn rotated_refresh_cookie_is_rejected_after_the_grace_window() {
    let (app, pool, _guard) = common::test_app().await;
    let user = common::seed_user(&pool, "grower@fruitunion.local", None).await;
    let cookie = format!("fu_refresh={}", common::refresh_token_for(&pool, &user).await);

    let (_, first) = common::get_with_cookie(&app, "/api/auth/session", &cookie).await;
    assert_eq!(first["user"]["id"], user.id.to_string());

    sqlx::query("UPDATE refresh_tokens SET rotated_at = NOW() - INTERVAL '5 minutes' WHERE rotated_at IS NOT NULL")
        .execute(&pool)
        .await
        .unwrap();

    let (status, replayed) = common::get_with_cookie(&app, "/api/auth/session", &cookie).await;
    assert_eq!(status, StatusCode::OK);
    assert!(replayed.is_null());
}

#[tokio::test]
async fn signed_out_refresh_cookie_never_refreshes() {
    let (app, pool, _guard) = common::test_app().await;
    let user = common::seed_user(&pool, "grower@fruitunion.local", None).await;
    let refresh = common::refresh_token_for(&pool, &user).await;
    server::auth::account::sign_out(&pool, Some(&refresh), None)
        .await
        .unwrap();

    let (status, response) =
        common::get_with_cookie(&app, "/api/auth/session", &format!("fu_refresh={refresh}")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(response.is_null());
}
