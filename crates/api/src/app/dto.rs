use serde::Deserialize;
use serde_json::Value;

use stockroom_infra::RecordFilter;
use stockroom_inventory::{parse_integer, Condition, InventoryRecord, RecordKey};

use crate::app::errors::ApiError;

// -------------------------
// Request DTOs
// -------------------------

/// `GET /inventory` query string. Values stay strings so bad input can be
/// reported in the error envelope instead of a bare extractor rejection.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub product_id: Option<String>,
    pub condition: Option<String>,
    pub available: Option<String>,
    pub needs_restock: Option<String>,
}

impl ListQuery {
    pub fn into_filter(self) -> Result<RecordFilter, ApiError> {
        let product_id = self
            .product_id
            .map(|raw| {
                raw.trim()
                    .parse::<i64>()
                    .map_err(|_| ApiError::validation(format!("invalid product_id filter {raw:?}")))
            })
            .transpose()?;

        let condition = self
            .condition
            .map(|raw| raw.parse::<Condition>().map_err(|e| ApiError::validation(e.to_string())))
            .transpose()?;

        let available = self
            .available
            .map(|raw| {
                boolish(&raw).ok_or_else(|| {
                    ApiError::validation(format!("invalid available filter {raw:?}"))
                })
            })
            .transpose()?;

        let needs_restock = match self.needs_restock {
            Some(raw) => boolish(&raw).ok_or_else(|| {
                ApiError::validation(format!("invalid needs_restock filter {raw:?}"))
            })?,
            None => false,
        };

        Ok(RecordFilter {
            product_id,
            condition,
            available,
            needs_restock,
        })
    }
}

fn boolish(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// Amount carried by a restock body (`{"amount": N}`).
pub fn restock_amount(body: &Value) -> Result<i64, ApiError> {
    let raw = body
        .get("amount")
        .ok_or_else(|| ApiError::validation("restock request is missing amount"))?;
    parse_integer(raw).ok_or_else(|| ApiError::validation(format!("invalid restock amount {raw}")))
}

// -------------------------
// Path mapping
// -------------------------

/// Key addressed by `/inventory/{product_id}/condition/{condition}`.
///
/// `None` when the segments cannot name any record; callers answer 404.
pub fn parse_key(product_id: &str, condition: &str) -> Option<RecordKey> {
    let product_id = product_id.trim().parse::<i64>().ok().filter(|p| *p > 0)?;
    let condition = condition.parse::<Condition>().ok()?;
    Some(RecordKey::new(product_id, condition))
}

pub fn location(key: &RecordKey) -> String {
    format!(
        "/inventory/{}/condition/{}",
        key.product_id,
        key.condition.as_str().replace(' ', "%20")
    )
}

// -------------------------
// Response mapping
// -------------------------

pub fn records_to_json(records: &[InventoryRecord]) -> Value {
    Value::Array(records.iter().map(InventoryRecord::serialize).collect())
}
