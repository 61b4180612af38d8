use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::auth::{check_permission, extract_bearer_token, AuthError, Claims};
use crate::error::ApiError;
use crate::AppState;

/// Route-layer auth gate: composed around each protected handler with
/// `middleware::from_fn_with_state((state, permission), permission_guard)`.
///
/// On success the verified claims are placed in request extensions for the
/// inner handler; on any failure the request short-circuits with the uniform
/// auth error envelope.
pub async fn permission_guard(
    State((state, permission)): State<(AppState, &'static str)>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = authorize(&state, request.headers(), permission).await?;
    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}

/// Full gate pipeline: extract bearer token, verify signature and standard
/// claims, then confirm the required permission is granted.
pub async fn authorize(
    state: &AppState,
    headers: &HeaderMap,
    permission: &str,
) -> Result<Claims, AuthError> {
    let token = extract_bearer_token(headers)?;
    let claims = state.verifier.verify(&token).await?;
    check_permission(permission, &claims)?;
    Ok(claims)
}
