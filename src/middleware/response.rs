use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

/// axum's `MethodRouter` answers unknown methods with a bodiless 405; rewrite
/// that into the standard JSON error envelope so clients always get one shape.
pub async fn method_not_allowed_envelope(request: Request, next: Next) -> Response {
    let response = next.run(request).await;

    if response.status() == StatusCode::METHOD_NOT_ALLOWED {
        return ApiError::method_not_allowed("method not allowed").into_response();
    }

    response
}
