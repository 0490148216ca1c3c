pub mod account;
pub mod cookies;
pub mod extractors;
pub mod jwt;
pub mod middleware;
pub mod password;

use shared_types::{AppError, Role, RoleRow, UnrecognizedRole};
use sqlx::{Pool, Postgres};
use uuid::Uuid;

/// Check if the given email matches the `ADMIN_EMAIL` env var (case-insensitive).
/// Returns `false` if the env var is empty or unset.
pub fn is_admin_email(email: &str) -> bool {
    match std::env::var("ADMIN_EMAIL") {
        Ok(admin) if !admin.is_empty() => admin.eq_ignore_ascii_case(email),
        _ => false,
    }
}

/// If the email matches `ADMIN_EMAIL`, give the user the admin role row.
/// Failures are logged and otherwise ignored; sign-in still succeeds.
pub async fn maybe_assign_admin(db: &Pool<Postgres>, user_id: Uuid, email: &str) {
    if !is_admin_email(email) {
        return;
    }

    match crate::repo::user_role::assign(db, user_id, Role::Admin).await {
        Ok(()) => tracing::info!(%user_id, email, "assigned admin role via ADMIN_EMAIL"),
        Err(e) => tracing::error!(%user_id, email, error = %e, "failed to assign admin role"),
    }
}

/// Turn what the user typed into the account email: trimmed, lowercased,
/// and with `@domain` appended when only a username was given.
pub fn normalize_login(login: &str, domain: &str) -> String {
    let login = login.trim().to_lowercase();
    if login.contains('@') {
        login
    } else {
        format!("{login}@{domain}")
    }
}

/// Resolve the stored role for server-side authorization.
pub async fn stored_role(
    db: &Pool<Postgres>,
    user_id: Uuid,
) -> Result<Result<Role, UnrecognizedRole>, AppError> {
    let row = crate::repo::user_role::find_by_user(db, user_id).await?;
    Ok(Role::resolve(row.as_ref().map(|r| r.role.as_str())))
}

/// The `user_roles` row of `target` as seen by `caller`. Callers may read
/// their own row and admins anyone's; the row is only read once allowed.
pub async fn role_row_for(
    db: &Pool<Postgres>,
    caller: Uuid,
    target: Uuid,
) -> Result<Option<RoleRow>, AppError> {
    if caller != target && stored_role(db, caller).await? != Ok(Role::Admin) {
        return Err(AppError::forbidden("You may only look up your own role"));
    }
    crate::repo::user_role::find_by_user(db, target).await
}

/// Whether a resolved role satisfies one of the accepted roles.
/// Unrecognized roles satisfy nothing.
pub fn role_allows(role: &Result<Role, UnrecognizedRole>, accepted: &[Role]) -> bool {
    role.as_ref().is_ok_and(|r| accepted.contains(r))
}
