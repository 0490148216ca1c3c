// Server-only helpers shared across all api/* modules.

use dioxus::prelude::*;
use shared_types::{AppError, Role};
use sqlx::{Pool, Postgres};

use crate::auth::{cookies, jwt};
use crate::error_convert::{AppErrorExt, SqlxErrorExt};

/// Database pool for server functions, with connection errors converted.
pub(crate) async fn db() -> Result<&'static Pool<Postgres>, ServerFnError> {
    crate::db::get_db()
        .await
        .map_err(|e| e.into_app_error().into_server_fn_error())
}

/// Claims of the caller, if signed in. Reads the middleware-validated claims
/// first and falls back to parsing the access token.
pub(crate) fn current_claims() -> Option<jwt::Claims> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();

    if let Some(claims) = parts.extensions.get::<jwt::Claims>() {
        return Some(claims.clone());
    }

    let token = cookies::extract_access_token(&parts.headers)?;
    jwt::validate_access_token(&token).ok()
}

/// Refresh token presented by the caller, used to revoke it on sign-out.
pub(crate) fn current_refresh_token() -> Option<String> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    cookies::extract_refresh_token(&parts.headers)
}

pub(crate) fn require_auth() -> Result<jwt::Claims, ServerFnError> {
    current_claims()
        .ok_or_else(|| AppError::unauthorized("Authentication required").into_server_fn_error())
}

/// Require a signed-in caller whose stored role is one of `accepted`.
pub(crate) async fn require_role(accepted: &[Role]) -> Result<jwt::Claims, ServerFnError> {
    let claims = require_auth()?;
    let role = crate::auth::stored_role(db().await?, claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    if !crate::auth::role_allows(&role, accepted) {
        tracing::info!(user_id = %claims.sub, ?role, "server function denied for role");
        let message = if accepted.contains(&Role::DeliveryPartner) {
            "Delivery partner role required"
        } else {
            "Admin role required"
        };
        return Err(AppError::forbidden(message).into_server_fn_error());
    }
    Ok(claims)
}

pub(crate) const STAFF: &[Role] = &[Role::Admin, Role::DeliveryPartner];
