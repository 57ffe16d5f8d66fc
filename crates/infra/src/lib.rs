//! Infrastructure layer: storage adapters and configuration.

pub mod config;
pub mod store;

pub use config::{Config, ConfigError};
pub use store::{
    InMemoryInventoryStore, InventoryStore, PostgresInventoryStore, RecordFilter, StoreError,
};
