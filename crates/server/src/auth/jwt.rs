use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use shared_types::{Session, SessionUser};
use uuid::Uuid;

/// Token type discriminator, so a refresh token is never accepted as an
/// access token and vice versa.
const TOKEN_TYPE_ACCESS: &str = "access";
const TOKEN_TYPE_REFRESH: &str = "refresh";

/// JWT claims stored in access and refresh tokens.
///
/// Roles are deliberately absent: every authorization decision reads
/// `user_roles`, so a role change takes effect on the next request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    /// Unique per token, so two tokens issued in the same second hash differently.
    pub jti: String,
    /// Session id shared by an access/refresh pair. A refresh issues a new one.
    pub sid: String,
    pub typ: String,
}

impl Claims {
    /// Session as seen by the client.
    pub fn session(&self) -> Session {
        Session {
            session_id: self.sid.clone(),
            expires_at: self.exp,
            user: SessionUser {
                id: self.sub,
                email: self.email.clone(),
            },
        }
    }
}

/// Freshly minted access/refresh pair.
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
    pub refresh_expires_at: DateTime<Utc>,
    pub access_claims: Claims,
}

/// SHA-256 of a raw token, hex-encoded. Only this hash is persisted; the raw
/// refresh token lives in the client's cookie.
pub fn hash_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn jwt_secret() -> Result<String, jsonwebtoken::errors::Error> {
    std::env::var("JWT_SECRET")
        .ok()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ErrorKind::InvalidKeyFormat.into())
}

pub fn access_token_expiry_minutes() -> i64 {
    std::env::var("JWT_ACCESS_TOKEN_EXPIRY_MINUTES")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(15)
}

pub fn refresh_token_expiry_days() -> i64 {
    std::env::var("JWT_REFRESH_TOKEN_EXPIRY_DAYS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(7)
}

fn sign(claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(jwt_secret()?.as_bytes()),
    )
}

/// Issue an access token and a refresh token for a new session.
pub fn create_token_pair(user_id: Uuid, email: &str) -> Result<TokenPair, jsonwebtoken::errors::Error> {
    let now = Utc::now();
    let sid = Uuid::new_v4().to_string();
    let refresh_expires_at = now + Duration::days(refresh_token_expiry_days());

    let access_claims = Claims {
        sub: user_id,
        email: email.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::minutes(access_token_expiry_minutes())).timestamp(),
        jti: Uuid::new_v4().to_string(),
        sid: sid.clone(),
        typ: TOKEN_TYPE_ACCESS.to_string(),
    };
    let refresh_claims = Claims {
        exp: refresh_expires_at.timestamp(),
        jti: Uuid::new_v4().to_string(),
        typ: TOKEN_TYPE_REFRESH.to_string(),
        ..access_claims.clone()
    };

    Ok(TokenPair {
        access_token: sign(&access_claims)?,
        refresh_token: sign(&refresh_claims)?,
        refresh_expires_at,
        access_claims,
    })
}

fn validate(token: &str, expected_typ: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret()?.as_bytes()),
        &Validation::default(),
    )?;
    if token_data.claims.typ != expected_typ {
        return Err(ErrorKind::InvalidToken.into());
    }
    Ok(token_data.claims)
}

/// Validate an access token. Refresh tokens are rejected.
pub fn validate_access_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    validate(token, TOKEN_TYPE_ACCESS)
}

/// Validate a refresh token. Access tokens are rejected.
pub fn validate_refresh_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    validate(token, TOKEN_TYPE_REFRESH)
}
