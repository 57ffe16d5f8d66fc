use stockroom_core::{DomainError, DomainResult};

/// What the caller of this request may do.
///
/// Computed per request by [`crate::middleware::access_middleware`] and read by
/// handlers as an extension; there is no process-wide permission state.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessLevel {
    /// Read-only view restricted to available records.
    Browse,
    /// Full read access and every mutation.
    Manage,
}

impl AccessLevel {
    pub fn can_manage(self) -> bool {
        self == AccessLevel::Manage
    }

    pub fn require_manage(self) -> DomainResult<()> {
        if self.can_manage() {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}
