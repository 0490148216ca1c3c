use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    middleware,
    Router,
};
use chrono::NaiveDate;
use serde_json::Value;
use shared_types::{
    CreateCustomerRequest, CreateDeliveryRequest, CustomerSummary, Delivery, SubscriptionPlan,
    SubscriptionStatus,
};
use sqlx::{Pool, Postgres};
use tokio::sync::Mutex;
use tower::ServiceExt;
use uuid::Uuid;

/// Global mutex ensuring tests run sequentially against the shared database.
/// Each test acquires this lock before truncating and seeding.
static TEST_MUTEX: std::sync::LazyLock<Mutex<()>> = std::sync::LazyLock::new(|| Mutex::new(()));

pub const TEST_PASSWORD: &str = "orchard-secret-42";

/// A seeded account and a bearer token for it.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub token: String,
}

/// Build a test router backed by a real Postgres pool.
/// Truncates every table; the returned `MutexGuard` must be held for the
/// duration of the test.
pub async fn test_app() -> (Router, Pool<Postgres>, tokio::sync::MutexGuard<'static, ()>) {
    let guard = TEST_MUTEX.lock().await;

    let _ = dotenvy::dotenv();
    if std::env::var("JWT_SECRET").map(|s| s.is_empty()).unwrap_or(true) {
        std::env::set_var("JWT_SECRET", "integration-test-secret");
    }

    let database_url = std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
        .expect("TEST_DATABASE_URL or DATABASE_URL must be set for tests");

    let pool = sqlx::postgres::PgPoolOptions::new()
        .max_connections(5)
        .connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("../../migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations");

    sqlx::query(
        "TRUNCATE deliveries, delivery_partners, customers, refresh_tokens, user_roles, profiles, users CASCADE",
    )
    .execute(&pool)
    .await
    .expect("Failed to truncate");

    let state = server::db::AppState { pool: pool.clone() };
    let router = server::rest::api_router()
        .layer(middleware::from_fn_with_state(
            state.clone(),
            server::auth::middleware::auth_middleware,
        ))
        .with_state(state);

    (router, pool, guard)
}

/// Create an account with an optional raw `user_roles` value. A
/// `delivery_partner` role also gets its `delivery_partners` row.
pub async fn seed_user(pool: &Pool<Postgres>, email: &str, role: Option<&str>) -> TestUser {
    let mut tx = pool.begin().await.expect("Failed to begin");
    let user = server::auth::account::create_account(&mut tx, email, TEST_PASSWORD, "Test User", None)
        .await
        .expect("Failed to create account");

    if let Some(role) = role {
        sqlx::query("INSERT INTO user_roles (id, user_id, role) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(user.id)
            .bind(role)
            .execute(&mut *tx)
            .await
            .expect("Failed to seed role");
        if role == "delivery_partner" {
            server::repo::delivery_partner::create(&mut tx, user.id)
                .await
                .expect("Failed to seed delivery partner");
        }
    }
    tx.commit().await.expect("Failed to commit");

    TestUser {
        id: user.id,
        token: token_for(user.id, &user.email),
        email: user.email,
    }
}

/// Mint an access token without going through sign-in.
pub fn token_for(user_id: Uuid, email: &str) -> String {
    server::auth::jwt::create_token_pair(user_id, email)
        .expect("Failed to create test JWT")
        .access_token
}

pub async fn seed_admin(pool: &Pool<Postgres>) -> TestUser {
    seed_user(pool, "admin@fruitunion.local", Some("admin")).await
}

pub async fn seed_partner(pool: &Pool<Postgres>) -> TestUser {
    seed_user(pool, "rider@fruitunion.local", Some("delivery_partner")).await
}

pub fn customer_request(username: &str, status: SubscriptionStatus) -> CreateCustomerRequest {
    CreateCustomerRequest {
        full_name: format!("{username} Customer"),
        username: username.to_string(),
        password: TEST_PASSWORD.to_string(),
        phone: Some("555-0100".to_string()),
        subscription_plan: SubscriptionPlan::Monthly,
        subscription_status: status,
        delivery_address: format!("{username} Orchard Lane"),
    }
}

/// Create a customer through the same path the admin dashboard uses.
pub async fn seed_customer(pool: &Pool<Postgres>, username: &str) -> CustomerSummary {
    server::dashboard::add_customer(
        pool,
        &customer_request(username, SubscriptionStatus::Active),
        chrono::Utc::now().date_naive(),
    )
    .await
    .expect("Failed to seed customer")
}

pub async fn seed_delivery(pool: &Pool<Postgres>, customer_id: Uuid, date: NaiveDate) -> Delivery {
    server::dashboard::schedule_delivery(
        pool,
        &CreateDeliveryRequest {
            customer_id,
            delivery_date: date,
            items: "6 apples, 4 pears".to_string(),
            delivery_address: None,
        },
    )
    .await
    .expect("Failed to seed delivery")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

fn request(method: &str, uri: &str, token: Option<&str>, body: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// POST JSON without credentials.
pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, Value) {
    send(app, request("POST", uri, None, Some(body))).await
}

/// POST JSON and keep the response headers (for cookie checks).
pub async fn post_json_with_headers(
    app: &Router,
    uri: &str,
    body: &str,
) -> (StatusCode, HeaderMap, Value) {
    send_full(app, request("POST", uri, None, Some(body))).await
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, None, None)).await
}

/// GET with a raw `Cookie` header and no bearer token.
pub async fn get_with_cookie(app: &Router, uri: &str, cookie: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("cookie", cookie)
        .body(Body::empty())
        .unwrap();
    send(app, req).await
}

/// A fresh refresh token for the user, already stored like a sign-in would.
pub async fn refresh_token_for(pool: &Pool<Postgres>, user: &TestUser) -> String {
    server::auth::account::issue_session(pool, user.id, &user.email)
        .await
        .expect("Failed to issue session")
        .tokens
        .refresh_token
}

pub async fn get_authed(app: &Router, uri: &str, token: &str) -> (StatusCode, Value) {
    send(app, request("GET", uri, Some(token), None)).await
}

pub async fn post_json_authed(app: &Router, uri: &str, body: &str, token: &str) -> (StatusCode, Value) {
    send(app, request("POST", uri, Some(token), Some(body))).await
}

pub async fn post_authed_with_headers(
    app: &Router,
    uri: &str,
    token: &str,
) -> (StatusCode, HeaderMap, Value) {
    send_full(app, request("POST", uri, Some(token), None)).await
}

pub async fn patch_json_authed(app: &Router, uri: &str, body: &str, token: &str) -> (StatusCode, Value) {
    send(app, request("PATCH", uri, Some(token), Some(body))).await
}

/// Send a request through the router and parse the response.
async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
    let (status, _, body) = send_full(app, req).await;
    (status, body)
}

async fn send_full(app: &Router, req: Request<Body>) -> (StatusCode, HeaderMap, Value) {
    let response = app
        .clone()
        .oneshot(req)
        .await
        .expect("Failed to send request");

    let status = response.status();
    let headers = response.headers().clone();
    let body_bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    let body: Value = if body_bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body_bytes).unwrap_or(Value::String(
            String::from_utf8_lossy(&body_bytes).to_string(),
        ))
    };

    (status, headers, body)
}

/// All `set-cookie` header values of a response.
pub fn set_cookies(headers: &HeaderMap) -> Vec<String> {
    headers
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}
