use thiserror::Error;

use stockroom_core::DomainError;

use crate::record::RecordKey;

/// Attributes of an inventory record, in declaration order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    ProductId,
    Condition,
    Quantity,
    RestockLevel,
    Available,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::ProductId,
        Field::Condition,
        Field::Quantity,
        Field::RestockLevel,
        Field::Available,
    ];

    /// JSON key of the field.
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::ProductId => "product_id",
            Field::Condition => "condition",
            Field::Quantity => "quantity",
            Field::RestockLevel => "restock_level",
            Field::Available => "available",
        }
    }
}

impl core::fmt::Display for Field {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rejection produced by record validation and state transitions.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RecordError {
    /// Every field that failed its domain check, in declaration order.
    #[error("invalid inventory record: bad {}", join(.0))]
    InvalidFields(Vec<Field>),

    #[error("invalid inventory record: missing {0}")]
    MissingField(Field),

    #[error("invalid inventory record: body contained bad or no data")]
    BadShape,

    #[error("invalid amount {0}: restock amount must not be negative")]
    NegativeAmount(i64),

    #[error("inventory {0} is out of stock and cannot be made available")]
    OutOfStock(RecordKey),
}

impl RecordError {
    /// Fields named by a validation failure (empty for other errors).
    pub fn fields(&self) -> &[Field] {
        match self {
            RecordError::InvalidFields(fields) => fields,
            _ => &[],
        }
    }
}

fn join(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<RecordError> for DomainError {
    fn from(err: RecordError) -> Self {
        match err {
            RecordError::OutOfStock(_) => DomainError::forbidden(err.to_string()),
            other => DomainError::validation(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Condition;

    #[test]
    fn invalid_fields_message_names_every_field() {
        let err = RecordError::InvalidFields(vec![Field::Condition, Field::RestockLevel]);
        assert_eq!(
            err.to_string(),
            "invalid inventory record: bad condition, restock_level"
        );
    }

    #[test]
    fn out_of_stock_maps_to_forbidden() {
        let key = RecordKey::new(2, Condition::New);
        let err: DomainError = RecordError::OutOfStock(key).into();
        assert!(matches!(err, DomainError::Forbidden(_)));
    }

    #[test]
    fn everything_else_maps_to_validation() {
        for err in [
            RecordError::InvalidFields(vec![Field::Quantity]),
            RecordError::MissingField(Field::Available),
            RecordError::BadShape,
            RecordError::NegativeAmount(-1),
        ] {
            let mapped: DomainError = err.into();
            assert!(matches!(mapped, DomainError::Validation(_)));
        }
    }
}
