use axum::{
    async_trait,
    body::Bytes,
    extract::{FromRequest, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
};
use serde_json::Value;

use crate::app::errors::ApiError;

const JSON_MEDIA_TYPE: &str = "application/json";

/// A JSON request body, accepted only under `Content-Type: application/json`.
///
/// Unlike `axum::Json` this keeps the raw [`Value`] so the record validator
/// can report every bad field, and its rejections use the service's error
/// envelope.
#[derive(Debug)]
pub struct JsonPayload(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        check_content_type(req.headers())?;

        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::MalformedBody(e.body_text()))?;

        serde_json::from_slice::<Value>(&bytes)
            .map(JsonPayload)
            .map_err(|e| ApiError::MalformedBody(format!("request body is not valid JSON: {e}")))
    }
}

fn check_content_type(headers: &HeaderMap) -> Result<(), ApiError> {
    let Some(raw) = headers.get(CONTENT_TYPE) else {
        return Err(ApiError::UnsupportedMediaType(format!(
            "Content-Type must be {JSON_MEDIA_TYPE}"
        )));
    };

    let media_type = raw
        .to_str()
        .ok()
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .unwrap_or_default();

    if media_type.eq_ignore_ascii_case(JSON_MEDIA_TYPE) {
        Ok(())
    } else {
        Err(ApiError::UnsupportedMediaType(format!(
            "Content-Type must be {JSON_MEDIA_TYPE}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn with_content_type(value: &'static str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(CONTENT_TYPE, HeaderValue::from_static(value));
        h
    }

    #[test]
    fn accepts_json_with_parameters() {
        assert!(check_content_type(&with_content_type("application/json")).is_ok());
        assert!(check_content_type(&with_content_type("application/json; charset=utf-8")).is_ok());
        assert!(check_content_type(&with_content_type("Application/JSON")).is_ok());
    }

    #[test]
    fn rejects_missing_or_other_media_types() {
        assert!(matches!(
            check_content_type(&HeaderMap::new()),
            Err(ApiError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            check_content_type(&with_content_type("text/plain")),
            Err(ApiError::UnsupportedMediaType(_))
        ));
        assert!(matches!(
            check_content_type(&with_content_type("application/jsonx")),
            Err(ApiError::UnsupportedMediaType(_))
        ));
    }
}
