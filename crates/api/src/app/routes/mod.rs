use axum::Router;

pub mod inventory;
pub mod system;

/// Router for all inventory endpoints.
pub fn router() -> Router {
    inventory::router()
}
