use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use sqlx::{Pool, Postgres};

use super::cookies::{self, CookieSlot, PendingCookieAction};
use super::jwt::validate_access_token;

/// Permissive auth middleware.
///
/// Validates the access token (cookie or Bearer) and stores its `Claims` in
/// the request extensions. A missing or invalid access token triggers a
/// transparent refresh from the refresh cookie. A `CookieSlot` is inserted
/// so server functions can schedule cookie changes, which are applied to
/// the response afterwards.
///
/// Never rejects a request; handlers decide authorization.
pub async fn auth_middleware(
    State(pool): State<Pool<Postgres>>,
    mut req: Request,
    next: Next,
) -> Response {
    let headers = req.headers().clone();
    let mut refreshed: Option<(String, String)> = None;

    let claims = cookies::extract_access_token(&headers)
        .and_then(|token| validate_access_token(&token).ok());

    match claims {
        Some(claims) => {
            req.extensions_mut().insert(claims);
        }
        None => {
            if let Some(refresh_token) = cookies::extract_refresh_token(&headers) {
                if let Some(issued) = super::account::refresh(&pool, &refresh_token).await {
                    tracing::debug!(user_id = %issued.session.user.id, "session refreshed");
                    req.extensions_mut().insert(issued.tokens.access_claims.clone());
                    refreshed = Some((issued.tokens.access_token, issued.tokens.refresh_token));
                }
            }
        }
    }

    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    // A cookie action from the handler (sign-in, sign-out) supersedes the
    // refreshed pair.
    match cookie_slot.take() {
        Some(PendingCookieAction::Set {
            access_token,
            refresh_token,
        }) => cookies::set_auth_cookies(response.headers_mut(), &access_token, &refresh_token),
        Some(PendingCookieAction::Clear) => cookies::clear_auth_cookies(response.headers_mut()),
        None => {
            if let Some((access, refresh)) = refreshed {
                cookies::set_auth_cookies(response.headers_mut(), &access, &refresh);
            }
        }
    }

    response
}
