use axum::body::{Body, Bytes};
use axum::extract::{FromRequest, Request};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::{debug, info, Level};

use crate::errors::ApiError;

/// Log method and path of every request; at `debug` also the body, which
/// is buffered under axum's default body limit and handed on unchanged.
pub async fn log_request(req: Request, next: Next) -> Response {
    info!(method = %req.method(), path = %req.uri().path(), "incoming request");
    if !tracing::enabled!(Level::DEBUG) {
        return next.run(req).await;
    }

    let (parts, body) = req.into_parts();
    let bytes = match Bytes::from_request(Request::new(body), &()).await {
        Ok(b) => b,
        Err(rejection) => return ApiError::from(rejection).into_response(),
    };
    if bytes.is_empty() {
        debug!(body = "{}", "request body");
    } else {
        debug!(body = %String::from_utf8_lossy(&bytes), "request body");
    }
    next.run(Request::from_parts(parts, Body::from(bytes))).await
}
