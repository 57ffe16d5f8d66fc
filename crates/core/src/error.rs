//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// missing records, key conflicts, business-rule blocks). Transport concerns
/// such as media types belong to the HTTP layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed or out-of-range input).
    #[error("{0}")]
    Validation(String),

    /// A requested resource was not found.
    #[error("{0} not found")]
    NotFound(String),

    /// A record with the same identity already exists.
    #[error("{0} already exists")]
    Conflict(String),

    /// A business rule blocks the operation (e.g. activating zero stock).
    #[error("{0}")]
    Forbidden(String),

    /// The caller is not allowed to perform mutations.
    #[error("unauthorized")]
    Unauthorized,
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(what: impl Into<String>) -> Self {
        Self::Conflict(what.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        Self::Forbidden(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_subject() {
        assert_eq!(
            DomainError::not_found("inventory (1, new)").to_string(),
            "inventory (1, new) not found"
        );
        assert_eq!(
            DomainError::conflict("inventory (1, new)").to_string(),
            "inventory (1, new) already exists"
        );
        assert_eq!(DomainError::validation("bad").to_string(), "bad");
        assert_eq!(DomainError::Unauthorized.to_string(), "unauthorized");
    }
}
