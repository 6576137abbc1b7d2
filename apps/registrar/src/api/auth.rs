//! # Authentication Module
//!
//! Bearer API key authentication for the Registrar HTTP API. This is the
//! whole auth surface of the service; user accounts, sessions, and roles
//! belong to an external identity collaborator.
//!
//! ## Configuration
//!
//! - `REGISTRAR_API_KEY`: if set, all requests except `/health` require
//!   this key via `Authorization: Bearer <key>`

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;

// =============================================================================
// API KEY AUTHENTICATION
// =============================================================================

/// Get the API key from the environment.
///
/// Returns `Some(key)` if `REGISTRAR_API_KEY` is set and non-empty,
/// `None` otherwise (disabling authentication).
pub fn get_api_key_from_env() -> Option<String> {
    std::env::var("REGISTRAR_API_KEY")
        .ok()
        .filter(|k| !k.is_empty())
}

/// Compare a provided key against the expected one in constant time.
///
/// Both sides are padded to a common length so the comparison always runs
/// over the same number of bytes; the length check is folded in afterwards
/// so a length mismatch costs the same as a content mismatch.
fn keys_match(provided: &str, expected: &str) -> bool {
    let provided = provided.as_bytes();
    let expected = expected.as_bytes();

    let max_len = provided.len().max(expected.len());
    let mut padded_provided = vec![0u8; max_len];
    let mut padded_expected = vec![0u8; max_len];
    padded_provided[..provided.len()].copy_from_slice(provided);
    padded_expected[..expected.len()].copy_from_slice(expected);

    let bytes_match: bool = padded_provided.ct_eq(&padded_expected).into();
    bytes_match && provided.len() == expected.len()
}

/// API key authentication middleware.
///
/// If `REGISTRAR_API_KEY` is set:
/// - `/health` is always allowed (load balancer checks)
/// - every other endpoint requires `Authorization: Bearer <key>`
///
/// If it is not set, all requests pass through.
pub async fn api_key_auth_middleware(
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    let Some(expected) = get_api_key_from_env() else {
        return Ok(next.run(request).await);
    };

    if request.uri().path() == "/health" {
        return Ok(next.run(request).await);
    }

    let auth_header = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    match auth_header {
        Some(header_value) => {
            // Accept both "Bearer <key>" and a raw "<key>".
            let provided = header_value.strip_prefix("Bearer ").unwrap_or(header_value);

            if keys_match(provided, &expected) {
                Ok(next.run(request).await)
            } else {
                tracing::warn!(
                    event = "auth_failure",
                    reason = "invalid_api_key",
                    "Authentication failed: invalid API key"
                );
                Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
            }
        }
        None => {
            tracing::warn!(
                event = "auth_failure",
                reason = "missing_authorization_header",
                "Missing Authorization header"
            );
            Err((StatusCode::UNAUTHORIZED, "Unauthorized"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
