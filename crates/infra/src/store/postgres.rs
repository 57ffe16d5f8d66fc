//! Postgres-backed inventory store.
//!
//! Rows live in the `inventory` table whose primary key is the composite
//! `(product_id, condition)`. The database enforces key uniqueness, so the
//! duplicate check on insert is a single atomic statement.

use async_trait::async_trait;
use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use tracing::Span;

use stockroom_core::Entity;
use stockroom_inventory::{Condition, InventoryRecord, RecordKey};

use super::{InventoryStore, RecordFilter, StoreError};

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS inventory (
    product_id    BIGINT   NOT NULL CHECK (product_id > 0),
    condition     TEXT     NOT NULL,
    quantity      BIGINT   NOT NULL CHECK (quantity BETWEEN 0 AND 50),
    restock_level BIGINT   NOT NULL CHECK (restock_level BETWEEN 0 AND 5),
    available     SMALLINT NOT NULL CHECK (available IN (0, 1)),
    PRIMARY KEY (product_id, condition)
)
"#;

/// Postgres-backed store.
///
/// Uses a SQLx connection pool, which is cheap to clone and thread-safe.
#[derive(Debug, Clone)]
pub struct PostgresInventoryStore {
    pool: PgPool,
}

impl PostgresInventoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `database_url`.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Create the `inventory` table if it does not exist yet.
    pub async fn ensure_schema(&self) -> Result<(), StoreError> {
        sqlx::query(SCHEMA).execute(&self.pool).await?;
        Ok(())
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}

fn record_from_row(row: &PgRow) -> Result<InventoryRecord, StoreError> {
    let product_id: i64 = row.try_get("product_id")?;
    let condition: String = row.try_get("condition")?;
    let quantity: i64 = row.try_get("quantity")?;
    let restock_level: i64 = row.try_get("restock_level")?;
    let available: i16 = row.try_get("available")?;

    let condition = condition
        .parse::<Condition>()
        .map_err(|e| StoreError::Backend(e.to_string()))?;
    InventoryRecord::new(product_id, condition, quantity, restock_level, available == 1)
        .map_err(|e| StoreError::Backend(format!("corrupt inventory row: {e}")))
}

#[async_trait]
impl InventoryStore for PostgresInventoryStore {
    async fn get(&self, key: &RecordKey) -> Result<Option<InventoryRecord>, StoreError> {
        Span::current().record("operation", "get_inventory");

        let row = sqlx::query(
            r#"
            SELECT product_id, condition, quantity, restock_level, available
            FROM inventory
            WHERE product_id = $1 AND condition = $2
            "#,
        )
        .bind(key.product_id)
        .bind(key.condition.as_str())
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(record_from_row).transpose()
    }

    async fn list(&self, filter: &RecordFilter) -> Result<Vec<InventoryRecord>, StoreError> {
        Span::current().record("operation", "list_inventory");

        let rows = sqlx::query(
            r#"
            SELECT product_id, condition, quantity, restock_level, available
            FROM inventory
            WHERE ($1::BIGINT IS NULL OR product_id = $1)
              AND ($2::TEXT IS NULL OR condition = $2)
              AND ($3::SMALLINT IS NULL OR available = $3)
              AND (NOT $4 OR quantity < restock_level)
            ORDER BY product_id, condition
            "#,
        )
        .bind(filter.product_id)
        .bind(filter.condition.map(|c| c.as_str()))
        .bind(filter.available.map(i16::from))
        .bind(filter.needs_restock)
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    async fn insert(&self, record: InventoryRecord) -> Result<(), StoreError> {
        Span::current().record("operation", "insert_inventory");

        let result = sqlx::query(
            r#"
            INSERT INTO inventory (product_id, condition, quantity, restock_level, available)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(record.product_id())
        .bind(record.condition().as_str())
        .bind(record.quantity())
        .bind(record.restock_level())
        .bind(i16::from(record.is_available()))
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(StoreError::Conflict(record.key())),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, key: &RecordKey, record: InventoryRecord) -> Result<(), StoreError> {
        Span::current().record("operation", "save_inventory");

        // One UPDATE moves the primary key too; a taken key trips the
        // unique constraint.
        let new_key = record.key();
        let result = sqlx::query(
            r#"
            UPDATE inventory
            SET product_id = $3,
                condition = $4,
                quantity = $5,
                restock_level = $6,
                available = $7
            WHERE product_id = $1 AND condition = $2
            "#,
        )
        .bind(key.product_id)
        .bind(key.condition.as_str())
        .bind(new_key.product_id)
        .bind(new_key.condition.as_str())
        .bind(record.quantity())
        .bind(record.restock_level())
        .bind(i16::from(record.is_available()))
        .execute(&self.pool)
        .await;

        let updated = match result {
            Ok(done) => done.rows_affected(),
            Err(e) if is_unique_violation(&e) => return Err(StoreError::Conflict(new_key)),
            Err(e) => return Err(e.into()),
        };
        if updated == 0 {
            return Err(StoreError::NotFound(*key));
        }
        Ok(())
    }

    async fn delete(&self, key: &RecordKey) -> Result<bool, StoreError> {
        Span::current().record("operation", "delete_inventory");

        let done = sqlx::query("DELETE FROM inventory WHERE product_id = $1 AND condition = $2")
            .bind(key.product_id)
            .bind(key.condition.as_str())
            .execute(&self.pool)
            .await?;
        Ok(done.rows_affected() > 0)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM inventory").execute(&self.pool).await?;
        Ok(())
    }
}
