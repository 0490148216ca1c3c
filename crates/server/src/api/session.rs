use dioxus::prelude::*;
use shared_types::{FeatureFlags, RoleRow, Session};
use uuid::Uuid;

#[cfg(feature = "server")]
use crate::error_convert::AppErrorExt;

#[cfg(feature = "server")]
use super::auth::*;

/// Get the current feature flags. No auth required; flags are not sensitive.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// The caller's session, or `None` when signed out. Transport and database
/// failures are errors; an absent or invalid token is not.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_session() -> Result<Option<Session>, ServerFnError> {
    let Some(claims) = current_claims() else {
        return Ok(None);
    };

    let exists = crate::repo::user::exists(db().await?, claims.sub)
        .await
        .map_err(|e| e.into_server_fn_error())?;
    if !exists {
        // Stale token for a deleted user: clear it so the client does not
        // stay stuck in a half-signed-in state.
        crate::auth::cookies::schedule_clear_cookies();
        tracing::warn!(user_id = %claims.sub, "token references non-existent user, clearing cookies");
        return Ok(None);
    }

    Ok(Some(claims.session()))
}

/// Sign in with an email or bare username. Sets HTTP-only auth cookies.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn sign_in(login: String, password: String) -> Result<Session, ServerFnError> {
    use shared_types::SignInRequest;

    let req = SignInRequest { login, password };
    let issued = crate::auth::account::sign_in(db().await?, &req)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    crate::auth::cookies::schedule_auth_cookies(&issued.tokens.access_token, &issued.tokens.refresh_token);
    Ok(issued.session)
}

/// Create an account and sign in. Sets HTTP-only auth cookies.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn sign_up(
    full_name: String,
    login: String,
    password: String,
    phone: Option<String>,
) -> Result<Session, ServerFnError> {
    use shared_types::SignUpRequest;

    let req = SignUpRequest {
        full_name,
        login,
        password,
        phone,
    };
    let issued = crate::auth::account::sign_up(db().await?, &req)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    crate::auth::cookies::schedule_auth_cookies(&issued.tokens.access_token, &issued.tokens.refresh_token);
    Ok(issued.session)
}

/// Revoke the current refresh token and clear the auth cookies. Succeeds
/// when already signed out.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn sign_out() -> Result<(), ServerFnError> {
    let refresh = current_refresh_token();
    let user_id = current_claims().map(|c| c.sub);

    if refresh.is_some() || user_id.is_some() {
        if let Err(e) = crate::auth::account::sign_out(db().await?, refresh.as_deref(), user_id).await {
            tracing::warn!(error = %e, "could not revoke refresh token on sign-out");
        }
    }

    crate::auth::cookies::schedule_clear_cookies();
    Ok(())
}

/// The single `user_roles` row for `user_id`, if any. Callers may look up
/// their own row; admins may look up anyone's.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn lookup_role(user_id: Uuid) -> Result<Option<RoleRow>, ServerFnError> {
    let claims = require_auth()?;
    crate::auth::role_row_for(db().await?, claims.sub, user_id)
        .await
        .map_err(|e| e.into_server_fn_error())
}
