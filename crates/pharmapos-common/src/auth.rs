//! Client-side JWT claims utilities.
//!
//! The client never verifies token signatures — it has no signing secret and
//! the backend re-checks every request anyway. What it does need is the `exp`
//! claim, read straight out of the payload segment, so the gateway can refresh
//! *before* sending a request that would bounce with a 401.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Deserialize;

/// Claims the client cares about. Everything is optional: tokens from the
/// backend have varied over time and unknown/missing fields must not break
/// the session.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Claims {
    /// Subject (user identifier).
    pub sub: Option<String>,
    /// Coarse authorization tag ("ADMIN", "CASHIER").
    pub role: Option<String>,
    /// Issued at (Unix timestamp).
    pub iat: Option<i64>,
    /// Expiration (Unix timestamp).
    pub exp: Option<i64>,
}

/// Decode the claims payload of a JWT without verifying its signature.
///
/// Returns `None` on any malformed input — wrong segment count, invalid
/// base64url, non-JSON payload. Never panics.
pub fn decode_claims(token: &str) -> Option<Claims> {
    let mut segments = token.split('.');
    let (_header, payload, _signature) =
        (segments.next()?, segments.next()?, segments.next()?);
    if segments.next().is_some() {
        return None;
    }
    // Tolerate both padded and unpadded encodings.
    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Whether `token` is expired at `now` (Unix seconds).
///
/// Fail-open policy, preserved from the original system: a token that cannot
/// be decoded or that carries no `exp` claim is treated as non-expiring
/// rather than blocking the request. A token expiring exactly at `now`
/// counts as expired.
pub fn is_expired(token: &str, now: i64) -> bool {
    match decode_claims(token).and_then(|c| c.exp) {
        Some(exp) => exp <= now,
        None => false,
    }
}
