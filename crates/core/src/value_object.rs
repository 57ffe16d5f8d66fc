//! Value object trait: equality by value, not identity.
//!
//! Value objects are domain objects that have **no identity** - they are defined entirely
//! by their attribute values. Two value objects with the same values are considered equal.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. An item condition
/// such as "open box" is a value object; an inventory record is an entity
/// (it has a key, and its quantity changes over time).
///
/// The trait requires:
/// - **Clone**: value objects are cheap to copy
/// - **PartialEq**: value objects are compared by their attribute values
/// - **Debug**: helpful for logging and testing
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
