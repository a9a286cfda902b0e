//! Signed CSRF tokens embedded in rendered forms
//!
//! A token is `<payload>.<signature>`, both base64url without padding. The
//! payload is JSON binding the token to one URL and one authenticated user,
//! and the signature is HMAC-SHA256 over the encoded payload.

use std::time::Duration;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;

use crate::models::Id;

type HmacSha256 = Hmac<Sha256>;

const MAX_TOKEN_LEN: usize = 2048;

/// Default lifetime accepted by `check_token` callers
pub const DEFAULT_MAX_AGE: Duration = Duration::from_secs(24 * 60 * 60);

/// CSRF verification errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CsrfError {
    #[error("malformed CSRF token")]
    Malformed,

    #[error("CSRF token signature mismatch")]
    BadSignature,

    #[error("CSRF token was issued for a different URL or user")]
    WrongBinding,

    #[error("CSRF token expired")]
    Expired,

    #[error("invalid CSRF secret")]
    InvalidSecret,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    url: String,
    authn_user_id: Id,
    /// Unix seconds
    issued_at: i64,
}

/// Generate a token for a form posting to `url` on behalf of `authn_user_id`.
pub fn generate_token(secret: &str, url: &str, authn_user_id: Id) -> Result<String, CsrfError> {
    generate_token_at(secret, url, authn_user_id, Utc::now().timestamp())
}

fn generate_token_at(
    secret: &str,
    url: &str,
    authn_user_id: Id,
    issued_at: i64,
) -> Result<String, CsrfError> {
    let payload = TokenPayload {
        url: url.to_string(),
        authn_user_id,
        issued_at,
    };
    let payload_bytes = serde_json::to_vec(&payload).map_err(|_| CsrfError::Malformed)?;
    let payload_part = URL_SAFE_NO_PAD.encode(payload_bytes);
    let sig_part = URL_SAFE_NO_PAD.encode(sign(secret, &payload_part)?);

    Ok(format!("{}.{}", payload_part, sig_part))
}

/// Verify a token's signature, URL/user binding and age.
pub fn check_token(
    secret: &str,
    token: &str,
    url: &str,
    authn_user_id: Id,
    max_age: Duration,
) -> Result<(), CsrfError> {
    if token.len() > MAX_TOKEN_LEN {
        return Err(CsrfError::Malformed);
    }
    let (payload_part, sig_part) = token.split_once('.').ok_or(CsrfError::Malformed)?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| CsrfError::InvalidSecret)?;
    mac.update(payload_part.as_bytes());
    let signature = URL_SAFE_NO_PAD
        .decode(sig_part)
        .map_err(|_| CsrfError::Malformed)?;
    mac.verify_slice(&signature)
        .map_err(|_| CsrfError::BadSignature)?;

    let payload_bytes = URL_SAFE_NO_PAD
        .decode(payload_part)
        .map_err(|_| CsrfError::Malformed)?;
    let payload: TokenPayload =
        serde_json::from_slice(&payload_bytes).map_err(|_| CsrfError::Malformed)?;

    if payload.url != url || payload.authn_user_id != authn_user_id {
        return Err(CsrfError::WrongBinding);
    }

    let age = Utc::now().timestamp() - payload.issued_at;
    if age < 0 || age as u64 > max_age.as_secs() {
        return Err(CsrfError::Expired);
    }

    Ok(())
}

fn sign(secret: &str, payload_part: &str) -> Result<Vec<u8>, CsrfError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|_| CsrfError::InvalidSecret)?;
    mac.update(payload_part.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}
