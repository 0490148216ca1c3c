use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    Json,
};
use sqlx::{Pool, Postgres};

use crate::auth::{account, cookies, extractors::MaybeAuth};
use shared_types::{AppError, AuthResponse, Session, SignInRequest, SignUpRequest};

fn issued_response(issued: account::IssuedSession) -> (HeaderMap, Json<AuthResponse>) {
    let mut headers = HeaderMap::new();
    cookies::set_auth_cookies(
        &mut headers,
        &issued.tokens.access_token,
        &issued.tokens.refresh_token,
    );
    (
        headers,
        Json(AuthResponse {
            session: issued.session,
            access_token: issued.tokens.access_token,
        }),
    )
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-up",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Account created and signed in", body = AuthResponse),
        (status = 403, description = "Self sign-up disabled", body = AppError),
        (status = 409, description = "Email already registered", body = AppError),
        (status = 422, description = "Missing fields", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, payload))]
pub async fn sign_up(
    State(pool): State<Pool<Postgres>>,
    Json(payload): Json<SignUpRequest>,
) -> Result<(StatusCode, HeaderMap, Json<AuthResponse>), AppError> {
    let issued = account::sign_up(&pool, &payload).await?;
    let (headers, body) = issued_response(issued);
    Ok((StatusCode::CREATED, headers, body))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-in",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in", body = AuthResponse),
        (status = 401, description = "Invalid credentials", body = AppError),
        (status = 422, description = "Missing fields", body = AppError)
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, payload))]
pub async fn sign_in(
    State(pool): State<Pool<Postgres>>,
    Json(payload): Json<SignInRequest>,
) -> Result<(HeaderMap, Json<AuthResponse>), AppError> {
    let issued = account::sign_in(&pool, &payload).await?;
    Ok(issued_response(issued))
}

#[utoipa::path(
    post,
    path = "/api/auth/sign-out",
    responses(
        (status = 204, description = "Signed out (also when already signed out)")
    ),
    tag = "auth"
)]
#[tracing::instrument(skip(pool, auth, headers))]
pub async fn sign_out(
    State(pool): State<Pool<Postgres>>,
    auth: MaybeAuth,
    headers: HeaderMap,
) -> Result<(StatusCode, HeaderMap), AppError> {
    let refresh = cookies::extract_refresh_token(&headers);
    account::sign_out(&pool, refresh.as_deref(), auth.0.map(|c| c.sub)).await?;

    let mut response_headers = HeaderMap::new();
    cookies::clear_auth_cookies(&mut response_headers);
    Ok((StatusCode::NO_CONTENT, response_headers))
}

#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Current session, or null when signed out", body = Option<Session>)
    ),
    tag = "auth"
)]
pub async fn get_session(auth: MaybeAuth) -> Json<Option<Session>> {
    Json(auth.0.map(|claims| claims.session()))
}
