use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Extension, Path, Query},
    http::{header::LOCATION, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};

use stockroom_core::Entity;
use stockroom_infra::InventoryStore;
use stockroom_inventory::{InventoryRecord, RecordKey};

use crate::app::errors::ApiError;
use crate::app::extract::JsonPayload;
use crate::app::routes::system::method_not_allowed;
use crate::app::dto;
use crate::context::AccessLevel;

type Store = Arc<dyn InventoryStore>;

const RECORD_PATH: &str = "/inventory/:product_id/condition/:condition";

pub fn router() -> Router {
    Router::new()
        .route(
            "/inventory",
            get(list_inventory)
                .post(create_inventory)
                .fallback(|| method_not_allowed("GET, HEAD, POST")),
        )
        .route(
            RECORD_PATH,
            get(get_inventory)
                .put(update_inventory)
                .delete(delete_inventory)
                .fallback(|| method_not_allowed("GET, HEAD, PUT, DELETE")),
        )
        .route(
            &format!("{RECORD_PATH}/restock"),
            put(restock_inventory).fallback(|| method_not_allowed("PUT")),
        )
        .route(
            &format!("{RECORD_PATH}/activate"),
            put(activate_inventory).fallback(|| method_not_allowed("PUT")),
        )
        .route(
            &format!("{RECORD_PATH}/deactivate"),
            put(deactivate_inventory).fallback(|| method_not_allowed("PUT")),
        )
}

fn record_key(product_id: &str, condition: &str) -> Result<RecordKey, ApiError> {
    dto::parse_key(product_id, condition)
        .ok_or_else(|| ApiError::not_found(format!("inventory ({product_id}, {condition})")))
}

async fn fetch(store: &Store, key: &RecordKey) -> Result<InventoryRecord, ApiError> {
    store
        .get(key)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("inventory {key}")))
}

fn record_response(status: StatusCode, record: &InventoryRecord) -> Response {
    (status, Json(record.serialize())).into_response()
}

pub async fn list_inventory(
    Extension(store): Extension<Store>,
    Extension(access): Extension<AccessLevel>,
    query: Result<Query<dto::ListQuery>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::validation(e.body_text()))?;
    let filter = query.into_filter()?;
    let mut records = store.list(&filter).await?;
    if !access.can_manage() {
        records.retain(InventoryRecord::is_available);
    }

    tracing::info!(count = records.len(), "listed inventory");
    Ok((StatusCode::OK, Json(dto::records_to_json(&records))).into_response())
}

pub async fn get_inventory(
    Extension(store): Extension<Store>,
    Extension(access): Extension<AccessLevel>,
    Path((product_id, condition)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let key = record_key(&product_id, &condition)?;
    let record = fetch(&store, &key).await?;

    // Browsing callers never learn that an unavailable record exists.
    if !access.can_manage() && !record.is_available() {
        return Err(ApiError::not_found(format!("inventory {key}")));
    }

    tracing::info!(%key, "fetched inventory");
    Ok(record_response(StatusCode::OK, &record))
}

pub async fn create_inventory(
    Extension(store): Extension<Store>,
    Extension(access): Extension<AccessLevel>,
    body: Result<JsonPayload, ApiError>,
) -> Result<Response, ApiError> {
    access.require_manage()?;
    let JsonPayload(body) = body?;

    let record = InventoryRecord::deserialize(&body)?.with_stock_rule();
    let key = record.key();
    store.insert(record.clone()).await?;

    tracing::info!(%key, quantity = record.quantity(), "inventory created");
    Ok((
        StatusCode::CREATED,
        [(LOCATION, dto::location(&key))],
        Json(record.serialize()),
    )
        .into_response())
}

pub async fn update_inventory(
    Extension(store): Extension<Store>,
    Extension(access): Extension<AccessLevel>,
    Path((product_id, condition)): Path<(String, String)>,
    body: Result<JsonPayload, ApiError>,
) -> Result<Response, ApiError> {
    access.require_manage()?;
    let JsonPayload(body) = body?;
    let key = record_key(&product_id, &condition)?;

    let updated = fetch(&store, &key).await?.update(&body)?;
    store.save(&key, updated.clone()).await?;

    tracing::info!(%key, new_key = %updated.key(), "inventory updated");
    Ok(record_response(StatusCode::OK, &updated))
}

pub async fn restock_inventory(
    Extension(store): Extension<Store>,
    Extension(access): Extension<AccessLevel>,
    Path((product_id, condition)): Path<(String, String)>,
    body: Result<JsonPayload, ApiError>,
) -> Result<Response, ApiError> {
    access.require_manage()?;
    let JsonPayload(body) = body?;
    let key = record_key(&product_id, &condition)?;

    let current = fetch(&store, &key).await?;
    let amount = dto::restock_amount(&body)?;
    let restocked = current.restock(amount)?;
    store.save(&key, restocked.clone()).await?;

    tracing::info!(%key, amount, quantity = restocked.quantity(), "inventory restocked");
    Ok(record_response(StatusCode::OK, &restocked))
}

pub async fn activate_inventory(
    Extension(store): Extension<Store>,
    Extension(access): Extension<AccessLevel>,
    Path((product_id, condition)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    access.require_manage()?;
    let key = record_key(&product_id, &condition)?;

    let activated = fetch(&store, &key).await?.activate()?;
    store.save(&key, activated.clone()).await?;

    tracing::info!(%key, "inventory activated");
    Ok(record_response(StatusCode::OK, &activated))
}

pub async fn deactivate_inventory(
    Extension(store): Extension<Store>,
    Extension(access): Extension<AccessLevel>,
    Path((product_id, condition)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    access.require_manage()?;
    let key = record_key(&product_id, &condition)?;

    let deactivated = fetch(&store, &key).await?.deactivate();
    store.save(&key, deactivated.clone()).await?;

    tracing::info!(%key, "inventory deactivated");
    Ok(record_response(StatusCode::OK, &deactivated))
}

/// Always 204: deleting a record that does not exist is not an error.
pub async fn delete_inventory(
    Extension(store): Extension<Store>,
    Extension(access): Extension<AccessLevel>,
    Path((product_id, condition)): Path<(String, String)>,
) -> Result<StatusCode, ApiError> {
    access.require_manage()?;

    if let Some(key) = dto::parse_key(&product_id, &condition) {
        let removed = store.delete(&key).await?;
        tracing::info!(%key, removed, "inventory deleted");
    }
    Ok(StatusCode::NO_CONTENT)
}
