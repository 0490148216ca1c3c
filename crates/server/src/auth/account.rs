//! Sign-in, sign-up, sign-out and refresh flows shared by the REST handlers
//! and the server functions. Cookie handling stays with the callers.

use chrono::{Duration, Utc};
use shared_types::{AppError, Session, SignInRequest, SignUpRequest};
use sqlx::{PgConnection, Pool, Postgres};
use uuid::Uuid;

use super::{jwt, password};
use crate::error_convert::{SqlxErrorExt, ValidateRequest};
use crate::repo::{self, user::UserRecord};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// A session together with the tokens that back it.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    pub session: Session,
    pub tokens: jwt::TokenPair,
}

/// Mint a token pair for the user and persist the refresh-token hash.
pub async fn issue_session(
    db: &Pool<Postgres>,
    user_id: Uuid,
    email: &str,
) -> Result<IssuedSession, AppError> {
    let tokens = jwt::create_token_pair(user_id, email).map_err(|e| {
        tracing::error!(error = %e, "failed to sign tokens");
        AppError::internal("Could not create a session")
    })?;

    repo::refresh_token::store(
        db,
        user_id,
        &jwt::hash_token(&tokens.refresh_token),
        tokens.refresh_expires_at,
    )
    .await?;

    Ok(IssuedSession {
        session: tokens.access_claims.session(),
        tokens,
    })
}

/// Create the `users` and `profiles` rows for a new login.
pub async fn create_account(
    conn: &mut PgConnection,
    email: &str,
    raw_password: &str,
    full_name: &str,
    phone: Option<&str>,
) -> Result<UserRecord, AppError> {
    let password_hash = password::hash_password(raw_password)?;
    let user = repo::user::create(conn, email, &password_hash).await?;
    let phone = phone.map(str::trim).filter(|p| !p.is_empty());
    repo::profile::create(conn, user.id, full_name.trim(), phone).await?;
    Ok(user)
}

#[tracing::instrument(skip(db, req), fields(login = %req.login))]
pub async fn sign_in(db: &Pool<Postgres>, req: &SignInRequest) -> Result<IssuedSession, AppError> {
    req.validate_request()?;

    let email = super::normalize_login(&req.login, &crate::config::login_email_domain());
    let user = repo::user::find_by_email(db, &email)
        .await?
        .ok_or_else(|| AppError::unauthorized(INVALID_CREDENTIALS))?;

    if !password::verify_password(&req.password, &user.password_hash) {
        tracing::info!(user_id = %user.id, "rejected sign-in with wrong password");
        return Err(AppError::unauthorized(INVALID_CREDENTIALS));
    }

    super::maybe_assign_admin(db, user.id, &user.email).await;
    let issued = issue_session(db, user.id, &user.email).await?;
    tracing::info!(user_id = %user.id, "signed in");
    Ok(issued)
}

/// Self-service registration. The new user has no role row, so they resolve
/// to the customer dashboard until an admin says otherwise.
#[tracing::instrument(skip(db, req), fields(login = %req.login))]
pub async fn sign_up(db: &Pool<Postgres>, req: &SignUpRequest) -> Result<IssuedSession, AppError> {
    if !crate::config::feature_flags().self_signup {
        return Err(AppError::forbidden("Sign-up is disabled. Please contact support."));
    }
    req.validate_request()?;

    let email = super::normalize_login(&req.login, &crate::config::login_email_domain());

    let mut tx = db.begin().await.map_err(SqlxErrorExt::into_app_error)?;
    let user = create_account(
        &mut tx,
        &email,
        &req.password,
        &req.full_name,
        req.phone.as_deref(),
    )
    .await?;
    tx.commit().await.map_err(SqlxErrorExt::into_app_error)?;

    super::maybe_assign_admin(db, user.id, &user.email).await;
    let issued = issue_session(db, user.id, &user.email).await?;
    tracing::info!(user_id = %user.id, "account created");
    Ok(issued)
}

/// Revoke the presented refresh token, or every token of the user when the
/// caller authenticated with a bearer token only.
pub async fn sign_out(
    db: &Pool<Postgres>,
    refresh_token: Option<&str>,
    user_id: Option<Uuid>,
) -> Result<(), AppError> {
    match (refresh_token, user_id) {
        (Some(token), _) => repo::refresh_token::revoke_by_hash(db, &jwt::hash_token(token)).await,
        (None, Some(user_id)) => repo::refresh_token::revoke_all_for_user(db, user_id).await,
        (None, None) => Ok(()),
    }
}

/// Seconds a rotated refresh token still mints sessions. Requests fired
/// together with the same cookie all rotate it; the first one starts the
/// window.
pub const ROTATION_GRACE_SECS: i64 = 30;

/// Rotate a refresh token. `None` when the token is invalid, expired,
/// revoked by sign-out, or rotated longer than `ROTATION_GRACE_SECS` ago.
pub async fn refresh(db: &Pool<Postgres>, refresh_token: &str) -> Option<IssuedSession> {
    let claims = jwt::validate_refresh_token(refresh_token).ok()?;

    let stored = match repo::refresh_token::find(db, claims.sub, &jwt::hash_token(refresh_token)).await {
        Ok(Some(stored)) => stored,
        Ok(None) => return None,
        Err(e) => {
            tracing::warn!(error = %e, "refresh token lookup failed");
            return None;
        }
    };

    let now = Utc::now();
    if stored.revoked || stored.expires_at <= now {
        return None;
    }
    let grace = Duration::seconds(ROTATION_GRACE_SECS);
    if stored.rotated_at.is_some_and(|at| now - at > grace) {
        tracing::warn!(user_id = %claims.sub, "rotated refresh token replayed");
        return None;
    }

    repo::refresh_token::mark_rotated(db, stored.id).await.ok()?;

    if !repo::user::exists(db, claims.sub).await.ok()? {
        tracing::warn!(user_id = %claims.sub, "refresh token references a deleted user");
        return None;
    }

    match issue_session(db, claims.sub, &claims.email).await {
        Ok(issued) => Some(issued),
        Err(e) => {
            tracing::warn!(user_id = %claims.sub, error = %e, "token refresh failed");
            None
        }
    }
}
