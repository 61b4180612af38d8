pub mod jwks;
pub mod verifier;

use axum::http::HeaderMap;
use serde::{Deserialize, Serialize};

pub use jwks::JwksVerifier;
pub use verifier::{verifier_from_config, SharedSecretVerifier, TokenVerifier};

/// Claims carried by a verified bearer token.
///
/// `permissions` stays `Option` so a token that omits the claim entirely can
/// be told apart from one with an empty permission list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<Vec<String>>,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
}

/// Uniform auth failure: machine-readable code, human description, HTTP status.
///
/// Returned as a plain `Result` error from every step of the gate so callers
/// inspect it explicitly; `ApiError::Auth` serializes it at the top level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthError {
    pub code: &'static str,
    pub description: String,
    pub status_code: u16,
}

impl AuthError {
    pub fn missing_header() -> Self {
        Self {
            code: "missing_authorization_header",
            description: "no authorization header".into(),
            status_code: 401,
        }
    }

    pub fn invalid_header(description: impl Into<String>) -> Self {
        Self {
            code: "invalid_authorization_header",
            description: description.into(),
            status_code: 401,
        }
    }

    pub fn unparseable_token() -> Self {
        Self {
            code: "invalid_authorization_header",
            description: "unable to parse authentication token".into(),
            status_code: 400,
        }
    }

    pub fn token_expired() -> Self {
        Self {
            code: "token_expired",
            description: "token has expired".into(),
            status_code: 401,
        }
    }

    pub fn invalid_claims() -> Self {
        Self {
            code: "invalid_claims",
            description: "incorrect claims; check the audience and issuer".into(),
            status_code: 401,
        }
    }

    pub fn unknown_key_id(kid: &str) -> Self {
        Self {
            code: "unknown_key_id",
            description: format!("no signing key found for kid {}", kid),
            status_code: 400,
        }
    }

    pub fn invalid_payload() -> Self {
        Self {
            code: "invalid_payload",
            description: "token payload does not include permissions".into(),
            status_code: 400,
        }
    }

    pub fn permission_not_allowed(permission: &str) -> Self {
        Self {
            code: "permission_not_allowed",
            description: format!("permission {} is not allowed for this action", permission),
            status_code: 401,
        }
    }

    pub fn verifier_unavailable(description: impl Into<String>) -> Self {
        Self {
            code: "verifier_unavailable",
            description: description.into(),
            status_code: 500,
        }
    }
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.description, self.code)
    }
}

impl std::error::Error for AuthError {}

/// Extract a bearer token from the `Authorization` header.
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<String, AuthError> {
    let header = headers
        .get("authorization")
        .ok_or_else(AuthError::missing_header)?;

    let value = header
        .to_str()
        .map_err(|_| AuthError::invalid_header("authorization header is not valid text"))?;

    let parts: Vec<&str> = value.split_whitespace().collect();
    if parts.len() != 2 {
        return Err(AuthError::invalid_header(
            "authorization header must have exactly two parts",
        ));
    }
    if !parts[0].eq_ignore_ascii_case("bearer") {
        return Err(AuthError::invalid_header(
            "authorization header does not contain a bearer token",
        ));
    }

    Ok(parts[1].to_string())
}

/// Confirm the required permission string is present in the token's claims.
pub fn check_permission(permission: &str, claims: &Claims) -> Result<(), AuthError> {
    let granted = claims.permissions.as_ref().ok_or_else(AuthError::invalid_payload)?;

    if !granted.iter().any(|p| p == permission) {
        return Err(AuthError::permission_not_allowed(permission));
    }

    Ok(())
}

/// Map a jsonwebtoken failure onto the auth error taxonomy.
pub(crate) fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::token_expired(),
        ErrorKind::InvalidAudience | ErrorKind::InvalidIssuer => AuthError::invalid_claims(),
        _ => AuthError::unparseable_token(),
    }
}
