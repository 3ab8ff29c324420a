use axum::extract::rejection::{BytesRejection, JsonRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::error;

pub const INTERNAL_MSG: &str = "Something went wrong";

/// The single place where failures become HTTP responses.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PayloadTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body rejections: oversize bodies keep their 413, everything else
    /// (syntax, content type, shape) is a 400.
    fn rejected(status: StatusCode, text: String) -> Self {
        if status == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(text)
        } else {
            ApiError::BadRequest(text)
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(msg) => ApiError::BadRequest(msg),
            ServiceError::MalformedId => ApiError::BadRequest(e.to_string()),
            ServiceError::NotFound(_) => ApiError::NotFound(e.to_string()),
            ServiceError::Db(msg) => ApiError::Internal(msg),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self {
        ApiError::rejected(r.status(), r.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(r: BytesRejection) -> Self {
        ApiError::rejected(r.status(), r.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match self {
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::PayloadTooLarge(msg) => {
                ErrorBody::new(msg)
            }
            ApiError::Internal(msg) => {
                error!(error = %msg, "request failed");
                ErrorBody::new(INTERNAL_MSG)
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use serde_json::{json, Value};

    async fn respond(e: ServiceError) -> (StatusCode, Value) {
        let res = ApiError::from(e).into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn malformed_id_is_bad_request() {
        assert_eq!(
            respond(ServiceError::MalformedId).await,
            (StatusCode::BAD_REQUEST, json!({ "error": "malformatted id" }))
        );
    }

    #[tokio::test]
    async fn not_found_uses_entity_message() {
        assert_eq!(
            respond(ServiceError::not_found("Favorite")).await,
            (StatusCode::NOT_FOUND, json!({ "error": "Favorite not found" }))
        );
    }

    #[tokio::test]
    async fn validation_passes_message_through() {
        assert_eq!(
            respond(ServiceError::Validation("title and creator required".into())).await,
            (StatusCode::BAD_REQUEST, json!({ "error": "title and creator required" }))
        );
    }

    #[tokio::test]
    async fn db_failure_hides_details() {
        let (status, body) = respond(ServiceError::Db("socket closed at 10.0.0.5".into())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({ "error": "Something went wrong" }));
        assert!(!body.to_string().contains("10.0.0.5"));
    }

    #[test]
    fn oversize_rejection_keeps_413() {
        assert_eq!(
            ApiError::rejected(StatusCode::PAYLOAD_TOO_LARGE, "too big".into()).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
        assert_eq!(
            ApiError::rejected(StatusCode::UNSUPPORTED_MEDIA_TYPE, "content type".into()).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
