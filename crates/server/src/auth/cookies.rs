use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

use super::jwt;

pub const ACCESS_COOKIE: &str = "fu_access";
pub const REFRESH_COOKIE: &str = "fu_refresh";

fn cookie_secure() -> bool {
    std::env::var("COOKIE_SECURE")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(false)
}

fn cookie_domain() -> Option<String> {
    std::env::var("COOKIE_DOMAIN")
        .ok()
        .filter(|d| !d.is_empty())
}

/// Build an HTTP-only auth cookie. A zero `max_age_seconds` clears it.
fn build_cookie(name: &'static str, value: &str, max_age_seconds: i64) -> Option<HeaderValue> {
    let mut cookie = Cookie::build((name, value.to_string()))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::seconds(max_age_seconds))
        .secure(cookie_secure());

    if let Some(domain) = cookie_domain() {
        cookie = cookie.domain(domain);
    }

    HeaderValue::from_str(&cookie.build().to_string()).ok()
}

/// Extract the access token from cookies (preferred) or Bearer header (fallback).
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    if let Some(token) = extract_cookie(headers, ACCESS_COOKIE) {
        return Some(token);
    }

    // REST clients send a Bearer header instead
    headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(|t| t.to_string())
}

pub fn extract_refresh_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, REFRESH_COOKIE)
}

/// Parse a specific cookie value from the Cookie header.
fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|s| s.split(';'))
        .filter_map(|piece| Cookie::parse(piece.trim().to_string()).ok())
        .find(|c| c.name() == name)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
}

/// Set both auth cookies using the configured token lifetimes.
pub fn set_auth_cookies(headers: &mut HeaderMap, access_token: &str, refresh_token: &str) {
    let access = build_cookie(
        ACCESS_COOKIE,
        access_token,
        jwt::access_token_expiry_minutes() * 60,
    );
    let refresh = build_cookie(
        REFRESH_COOKIE,
        refresh_token,
        jwt::refresh_token_expiry_days() * 86_400,
    );
    for value in [access, refresh].into_iter().flatten() {
        headers.append(header::SET_COOKIE, value);
    }
}

pub fn clear_auth_cookies(headers: &mut HeaderMap) {
    let access = build_cookie(ACCESS_COOKIE, "", 0);
    let refresh = build_cookie(REFRESH_COOKIE, "", 0);
    for value in [access, refresh].into_iter().flatten() {
        headers.append(header::SET_COOKIE, value);
    }
}

/// Cookie change requested by a server function, applied by the auth
/// middleware once the response is built.
#[derive(Clone, Debug, PartialEq)]
pub enum PendingCookieAction {
    Set {
        access_token: String,
        refresh_token: String,
    },
    Clear,
}

/// Per-request slot shared between the middleware and server functions.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

impl CookieSlot {
    pub fn put(&self, action: PendingCookieAction) {
        if let Ok(mut slot) = self.0.lock() {
            *slot = Some(action);
        }
    }

    pub fn take(&self) -> Option<PendingCookieAction> {
        self.0.lock().ok().and_then(|mut slot| slot.take())
    }
}

fn schedule(action: PendingCookieAction) {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            slot.put(action);
        }
    }
}

/// Schedule auth cookies from inside a server function.
pub fn schedule_auth_cookies(access_token: &str, refresh_token: &str) {
    schedule(PendingCookieAction::Set {
        access_token: access_token.to_string(),
        refresh_token: refresh_token.to_string(),
    });
}

/// Schedule clearing of the auth cookies from inside a server function.
pub fn schedule_clear_cookies() {
    schedule(PendingCookieAction::Clear);
}
