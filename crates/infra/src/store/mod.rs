//! Keyed inventory storage.
//!
//! The HTTP layer only ever talks to [`InventoryStore`]; adapters decide where
//! the rows live.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use stockroom_core::DomainError;
use stockroom_inventory::{Condition, InventoryRecord, RecordKey};

pub use memory::InMemoryInventoryStore;
pub use postgres::PostgresInventoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("inventory {0} already exists")]
    Conflict(RecordKey),

    #[error("inventory {0} not found")]
    NotFound(RecordKey),

    /// The storage engine itself failed (connection, corrupt row, poisoned lock).
    #[error("store backend failure: {0}")]
    Backend(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Backend(err.to_string())
    }
}

impl StoreError {
    /// Domain view of the error; `None` for backend failures, which have no
    /// domain meaning.
    pub fn into_domain(self) -> Option<DomainError> {
        match self {
            StoreError::Conflict(key) => Some(DomainError::conflict(format!("inventory {key}"))),
            StoreError::NotFound(key) => Some(DomainError::not_found(format!("inventory {key}"))),
            StoreError::Backend(_) => None,
        }
    }
}

/// Optional list filters; an empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    pub product_id: Option<i64>,
    pub condition: Option<Condition>,
    pub available: Option<bool>,
    /// Only records whose quantity is below their restock level.
    pub needs_restock: bool,
}

impl RecordFilter {
    pub fn matches(&self, record: &InventoryRecord) -> bool {
        self.product_id.is_none_or(|p| record.product_id() == p)
            && self.condition.is_none_or(|c| record.condition() == c)
            && self.available.is_none_or(|a| record.is_available() == a)
            && (!self.needs_restock || record.needs_restock())
    }
}

/// Keyed data store for inventory records.
#[async_trait]
pub trait InventoryStore: Send + Sync {
    async fn get(&self, key: &RecordKey) -> Result<Option<InventoryRecord>, StoreError>;

    /// Matching records ordered by key (product id, then condition).
    async fn list(&self, filter: &RecordFilter) -> Result<Vec<InventoryRecord>, StoreError>;

    /// Add a new record; `Conflict` if its key is taken.
    async fn insert(&self, record: InventoryRecord) -> Result<(), StoreError>;

    /// Replace the record stored at `key`.
    ///
    /// If `record` carries a different key the row moves: the old key is
    /// released and the new one must be free (`Conflict` otherwise).
    async fn save(&self, key: &RecordKey, record: InventoryRecord) -> Result<(), StoreError>;

    /// Remove the record at `key`. Returns whether a row was removed.
    async fn delete(&self, key: &RecordKey) -> Result<bool, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;
}

#[async_trait]
impl<S> InventoryStore for Arc<S>
where
    S: InventoryStore + ?Sized,
{
    async fn get(&self, key: &RecordKey) -> Result<Option<InventoryRecord>, StoreError> {
        (**self).get(key).await
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<InventoryRecord>, StoreError> {
        (**self).list(filter).await
    }

    async fn insert(&self, record: InventoryRecord) -> Result<(), StoreError> {
        (**self).insert(record).await
    }

    async fn save(&self, key: &RecordKey, record: InventoryRecord) -> Result<(), StoreError> {
        (**self).save(key, record).await
    }

    async fn delete(&self, key: &RecordKey) -> Result<bool, StoreError> {
        (**self).delete(key).await
    }

    async fn clear(&self) -> Result<(), StoreError> {
        (**self).clear().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(
        product_id: i64,
        condition: Condition,
        quantity: i64,
        available: bool,
    ) -> InventoryRecord {
        InventoryRecord::new(product_id, condition, quantity, 3, available).unwrap()
    }

    #[test]
    fn empty_filter_matches_everything() {
        let f = RecordFilter::default();
        assert!(f.matches(&record(1, Condition::New, 5, true)));
        assert!(f.matches(&record(2, Condition::Used, 0, false)));
    }

    #[test]
    fn filters_combine() {
        let f = RecordFilter {
            product_id: Some(1),
            available: Some(true),
            ..RecordFilter::default()
        };
        assert!(f.matches(&record(1, Condition::Used, 5, true)));
        assert!(!f.matches(&record(1, Condition::Used, 5, false)));
        assert!(!f.matches(&record(2, Condition::Used, 5, true)));
    }

    #[test]
    fn needs_restock_filter_uses_level() {
        let f = RecordFilter {
            needs_restock: true,
            ..RecordFilter::default()
        };
        assert!(f.matches(&record(1, Condition::New, 2, true)));
        assert!(!f.matches(&record(1, Condition::New, 3, true)));
    }

    #[test]
    fn backend_errors_have_no_domain_meaning() {
        assert!(StoreError::Backend("down".into()).into_domain().is_none());
        let key = RecordKey::new(1, Condition::New);
        assert_eq!(
            StoreError::Conflict(key).into_domain(),
            Some(DomainError::conflict("inventory (1, new)"))
        );
    }
}
