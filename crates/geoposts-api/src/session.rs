//! One-shot flash messages and CSRF tokens, both kept in signed cookies.

use axum_extra::extract::cookie::{Cookie, SameSite, SignedCookieJar};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use tracing::warn;

const FLASH_COOKIE: &str = "flash";
const CSRF_COOKIE: &str = "csrf_token";

pub const CSRF_MISSING: &str = "The CSRF token is missing.";
pub const CSRF_INVALID: &str = "The CSRF token is invalid.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub category: String,
    pub message: String,
}

fn session_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// Queue a message for the next rendered page.
pub fn push_flash(jar: SignedCookieJar, category: &str, message: &str) -> SignedCookieJar {
    let flash = Flash {
        category: category.to_string(),
        message: message.to_string(),
    };
    // Hex keeps JSON quoting out of the cookie value.
    match serde_json::to_vec(&flash) {
        Ok(bytes) => jar.add(session_cookie(FLASH_COOKIE, hex::encode(bytes))),
        Err(e) => {
            warn!("Dropping flash message: {}", e);
            jar
        }
    }
}

/// Pop the pending flash message, if any.
pub fn take_flash(jar: SignedCookieJar) -> (SignedCookieJar, Option<Flash>) {
    let Some(cookie) = jar.get(FLASH_COOKIE) else {
        return (jar, None);
    };

    let flash = hex::decode(cookie.value())
        .ok()
        .and_then(|bytes| serde_json::from_slice(&bytes).ok());

    (jar.remove(Cookie::build(FLASH_COOKIE).path("/")), flash)
}

/// Token for the form being rendered. An existing token is reused so that
/// several open tabs stay valid.
pub fn issue_csrf(jar: SignedCookieJar) -> (SignedCookieJar, String) {
    if let Some(existing) = jar.get(CSRF_COOKIE) {
        let token = existing.value().to_string();
        return (jar, token);
    }

    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    let token = hex::encode(bytes);

    (jar.add(session_cookie(CSRF_COOKIE, token.clone())), token)
}

pub fn verify_csrf(jar: &SignedCookieJar, submitted: &str) -> Result<(), &'static str> {
    if submitted.is_empty() {
        return Err(CSRF_MISSING);
    }
    let expected = jar.get(CSRF_COOKIE).ok_or(CSRF_INVALID)?;
    let expected = hex::decode(expected.value()).map_err(|_| CSRF_INVALID)?;
    let submitted = hex::decode(submitted).map_err(|_| CSRF_INVALID)?;
    if !constant_time_eq(&expected, &submitted) {
        return Err(CSRF_INVALID);
    }
    Ok(())
}

/// Runs in time independent of where the inputs differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b) {
        diff |= x ^ y;
    }
    diff == 0
}
