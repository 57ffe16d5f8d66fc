use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};

use crate::context::AccessLevel;

pub const API_KEY_HEADER: &str = "x-api-key";

#[derive(Clone)]
pub struct AccessState {
    /// Expected `X-Api-Key`, already trimmed; `None` grants everyone [`AccessLevel::Manage`].
    pub api_key: Option<Arc<str>>,
}

pub async fn access_middleware(
    State(state): State<AccessState>,
    mut req: Request,
    next: Next,
) -> Response {
    let level = access_level(state.api_key.as_deref(), req.headers());
    req.extensions_mut().insert(level);
    next.run(req).await
}

fn access_level(expected: Option<&str>, headers: &HeaderMap) -> AccessLevel {
    let Some(expected) = expected else {
        return AccessLevel::Manage;
    };

    let given = headers
        .get(API_KEY_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim);

    if given == Some(expected) {
        AccessLevel::Manage
    } else {
        AccessLevel::Browse
    }
}
