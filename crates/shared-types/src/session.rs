use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[cfg(feature = "validation")]
use validator::Validate;

/// Signed-in identity handed to every dashboard view.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SessionUser {
    pub id: Uuid,
    pub email: String,
}

/// Proof of an authenticated identity.
///
/// The raw tokens live in HTTP-only cookies; the client only ever sees the
/// opaque `session_id`, which changes whenever the token pair is refreshed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct Session {
    pub session_id: String,
    /// Access token expiry, seconds since the Unix epoch.
    pub expires_at: i64,
    pub user: SessionUser,
}

impl Session {
    /// Identity key: two sessions for the same user are the same sign-in
    /// even if a token refresh replaced the session id.
    pub fn user_id(&self) -> Uuid {
        self.user.id
    }

    pub fn same_identity(&self, other: &Session) -> bool {
        self.user.id == other.user.id
    }
}

/// Sign-in request. `login` is an email address or a bare username.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct SignInRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Email or username is required"))
    )]
    pub login: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Self-service sign-up request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct SignUpRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Full name is required"))
    )]
    pub full_name: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Email or username is required"))
    )]
    pub login: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// REST response after sign-in or sign-up. Browser clients rely on the
/// cookies instead; non-browser clients use `access_token` as a Bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct AuthResponse {
    pub session: Session,
    pub access_token: String,
}
