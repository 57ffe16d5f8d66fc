//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Two entities with the same identity are the same record, whatever their
/// other attributes say. Stores key their rows by [`Entity::key`].
pub trait Entity {
    /// Strongly-typed identity. Ordered so stores can keep rows sorted by key.
    type Key: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identity.
    fn key(&self) -> Self::Key;
}
