//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: infrastructure wiring (which store backs the service)
//! - `routes/`: HTTP routes + handlers
//! - `extract.rs`: the JSON body extractor with its content-type check
//! - `dto.rs`: query/path parsing and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use stockroom_infra::InventoryStore;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod extract;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs` and the
/// black-box tests).
///
/// `api_key` switches on the access policy: callers without a matching
/// `X-Api-Key` header may only browse available records.
pub fn build_app(store: Arc<dyn InventoryStore>, api_key: Option<String>) -> Router {
    let access_state = middleware::AccessState {
        api_key: api_key.map(|k| Arc::from(k.trim())),
    };

    Router::new()
        .route("/", get(routes::system::index))
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .fallback(routes::system::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(Extension(store))
                .layer(axum::middleware::from_fn_with_state(
                    access_state,
                    middleware::access_middleware,
                )),
        )
}
