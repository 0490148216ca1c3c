use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use shared_types::{AppError, Role};
use sqlx::{Pool, Postgres};

use super::jwt::Claims;

/// Extractor that requires authentication. Returns 401 if no valid token.
pub struct AuthRequired(pub Claims);

impl<S: Send + Sync> FromRequestParts<S> for AuthRequired {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Claims>()
            .cloned()
            .map(AuthRequired)
            .ok_or_else(|| AppError::unauthorized("Authentication required"))
    }
}

/// Extractor that optionally extracts auth claims. Never fails.
pub struct MaybeAuth(pub Option<Claims>);

impl<S: Send + Sync> FromRequestParts<S> for MaybeAuth {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(MaybeAuth(parts.extensions.get::<Claims>().cloned()))
    }
}

/// Role groups accepted by [`RoleRequired`].
pub const ADMIN: u8 = 0;
pub const DELIVERY_STAFF: u8 = 1;

fn accepted_roles(group: u8) -> &'static [Role] {
    match group {
        ADMIN => &[Role::Admin],
        _ => &[Role::Admin, Role::DeliveryPartner],
    }
}

/// Extractor that requires authentication and a role from the given group,
/// read from `user_roles` on every request.
/// Returns 401 if unauthenticated, 403 if the role does not qualify.
///
/// - `RoleRequired<ADMIN>`: admin only
/// - `RoleRequired<DELIVERY_STAFF>`: delivery partner or admin
pub struct RoleRequired<const GROUP: u8> {
    pub claims: Claims,
    pub role: Role,
}

impl<const GROUP: u8, S> FromRequestParts<S> for RoleRequired<GROUP>
where
    S: Send + Sync,
    Pool<Postgres>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthRequired(claims) = AuthRequired::from_request_parts(parts, state).await?;
        let pool = Pool::<Postgres>::from_ref(state);

        let accepted = accepted_roles(GROUP);
        match super::stored_role(&pool, claims.sub).await? {
            Ok(role) if accepted.contains(&role) => Ok(RoleRequired { claims, role }),
            Ok(role) => {
                tracing::info!(user_id = %claims.sub, %role, "role not permitted");
                Err(AppError::forbidden(match GROUP {
                    ADMIN => "Admin role required",
                    _ => "Delivery partner role required",
                }))
            }
            Err(unknown) => {
                tracing::warn!(user_id = %claims.sub, %unknown, "request from unrecognized role");
                Err(AppError::forbidden("Invalid user role. Please contact support."))
            }
        }
    }
}
