//! Consistent error responses.
//!
//! Every failure leaves the service as `{ "status", "error", "message" }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_infra::StoreError;
use stockroom_inventory::RecordError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The request body could not be read as JSON.
    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    UnsupportedMediaType(String),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::Domain(DomainError::not_found(what))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Domain(DomainError::validation(msg))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Domain(DomainError::Validation(_)) => StatusCode::BAD_REQUEST,
            ApiError::Domain(DomainError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Domain(DomainError::Conflict(_)) => StatusCode::CONFLICT,
            ApiError::Domain(DomainError::Forbidden(_)) => StatusCode::FORBIDDEN,
            ApiError::Domain(DomainError::Unauthorized) => StatusCode::UNAUTHORIZED,
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RecordError> for ApiError {
    fn from(err: RecordError) -> Self {
        Self::Domain(err.into())
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        let msg = err.to_string();
        match err.into_domain() {
            Some(domain) => Self::Domain(domain),
            None => Self::Internal(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), %message, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), %message, "request rejected");
        }
        json_error(status, message)
    }
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        axum::Json(json!({
            "status": status.as_u16(),
            "error": status.canonical_reason().unwrap_or("Error"),
            "message": message.into(),
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockroom_inventory::{Condition, Field, RecordKey};

    #[test]
    fn maps_the_error_taxonomy_to_statuses() {
        let key = RecordKey::new(2, Condition::New);
        let invalid = RecordError::InvalidFields(vec![Field::Quantity]);
        let cases = [
            (ApiError::from(invalid), StatusCode::BAD_REQUEST),
            (ApiError::from(RecordError::NegativeAmount(-1)), StatusCode::BAD_REQUEST),
            (ApiError::from(RecordError::OutOfStock(key)), StatusCode::FORBIDDEN),
            (ApiError::from(StoreError::Conflict(key)), StatusCode::CONFLICT),
            (ApiError::from(StoreError::NotFound(key)), StatusCode::NOT_FOUND),
            (
                ApiError::from(StoreError::Backend("down".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Domain(DomainError::Unauthorized), StatusCode::UNAUTHORIZED),
            (
                ApiError::UnsupportedMediaType("x".into()),
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ),
            (ApiError::MalformedBody("x".into()), StatusCode::BAD_REQUEST),
        ];
        for (err, status) in cases {
            assert_eq!(err.status(), status, "{err}");
        }
    }

    #[test]
    fn conflict_message_names_the_key() {
        let err = ApiError::from(StoreError::Conflict(RecordKey::new(1, Condition::New)));
        assert_eq!(err.to_string(), "inventory (1, new) already exists");
    }
}
