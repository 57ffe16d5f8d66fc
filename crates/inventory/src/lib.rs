//! Inventory domain module.
//!
//! This crate contains the business rules for inventory records, implemented
//! purely as deterministic domain logic (no IO, no HTTP, no storage).

pub mod condition;
pub mod error;
pub mod record;

pub use condition::{Condition, UnknownCondition};
pub use error::{Field, RecordError};
pub use record::{
    InventoryRecord, QUANTITY_MAX, RESTOCK_LEVEL_MAX, RecordFields, RecordKey, parse_integer,
};
