use std::sync::Arc;

use stockroom_infra::{
    Config, InMemoryInventoryStore, InventoryStore, PostgresInventoryStore, StoreError,
};

/// Pick the store backing the service: Postgres when `DATABASE_URL` is set,
/// otherwise a process-local in-memory map.
pub async fn build_store(config: &Config) -> Result<Arc<dyn InventoryStore>, StoreError> {
    match config.database_url.as_deref() {
        Some(url) => {
            let store = PostgresInventoryStore::connect(url).await?;
            store.ensure_schema().await?;
            tracing::info!("using postgres inventory store");
            Ok(Arc::new(store))
        }
        None => {
            tracing::warn!("DATABASE_URL not set; inventory is kept in memory and lost on restart");
            Ok(Arc::new(InMemoryInventoryStore::new()))
        }
    }
}
