use axum::{
    http::{header::ALLOW, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::app::errors;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

/// Service banner at `/`.
pub async fn index() -> impl IntoResponse {
    tracing::info!("request for root url");
    Json(serde_json::json!({
        "name": "Inventory Demo REST API Service",
        "version": env!("CARGO_PKG_VERSION"),
        "paths": "/inventory",
    }))
}

pub async fn not_found() -> Response {
    errors::json_error(StatusCode::NOT_FOUND, "the requested resource does not exist")
}

/// 405 for a known path; `allow` lists the methods the path does serve.
pub async fn method_not_allowed(allow: &'static str) -> Response {
    let mut res = errors::json_error(
        StatusCode::METHOD_NOT_ALLOWED,
        "the method is not allowed for the requested url",
    );
    res.headers_mut().insert(ALLOW, HeaderValue::from_static(allow));
    res
}
