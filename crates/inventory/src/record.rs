use serde_json::{Map, Value};

use stockroom_core::Entity;

use crate::condition::Condition;
use crate::error::{Field, RecordError};

/// Upper bound (inclusive) for `quantity`.
pub const QUANTITY_MAX: i64 = 50;

/// Upper bound (inclusive) for `restock_level`.
pub const RESTOCK_LEVEL_MAX: i64 = 5;

/// Candidate field values as they arrive on the wire.
pub type RecordFields = Map<String, Value>;

/// Composite identity of an inventory record.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordKey {
    pub product_id: i64,
    pub condition: Condition,
}

impl RecordKey {
    pub fn new(product_id: i64, condition: Condition) -> Self {
        Self {
            product_id,
            condition,
        }
    }
}

impl core::fmt::Display for RecordKey {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.product_id, self.condition)
    }
}

/// One inventory row.
///
/// Values of this type always satisfy the per-field domains. Transitions take
/// `&self` and hand back a new record; nothing is written until the caller
/// persists the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    product_id: i64,
    condition: Condition,
    quantity: i64,
    restock_level: i64,
    available: bool,
}

fn valid_product_id(v: &i64) -> bool {
    *v > 0
}

fn valid_quantity(v: &i64) -> bool {
    (0..=QUANTITY_MAX).contains(v)
}

fn valid_restock_level(v: &i64) -> bool {
    (0..=RESTOCK_LEVEL_MAX).contains(v)
}

fn flag(v: i64) -> Option<bool> {
    match v {
        0 => Some(false),
        1 => Some(true),
        _ => None,
    }
}

/// Integer fields accept JSON integers and digit strings (`"12"`, `" 7 "`, `"-3"`).
fn integer(value: Option<&Value>) -> Option<i64> {
    match value? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => {
            let s = s.trim();
            let digits = s.strip_prefix('-').unwrap_or(s);
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            s.parse().ok()
        }
        _ => None,
    }
}

/// Read a JSON integer or digit string, as integer record fields do.
pub fn parse_integer(value: &Value) -> Option<i64> {
    integer(Some(value))
}

impl InventoryRecord {
    /// Build a record from typed values, collecting every out-of-domain field.
    pub fn new(
        product_id: i64,
        condition: Condition,
        quantity: i64,
        restock_level: i64,
        available: bool,
    ) -> Result<Self, RecordError> {
        let mut invalid = Vec::new();
        if !valid_product_id(&product_id) {
            invalid.push(Field::ProductId);
        }
        if !valid_quantity(&quantity) {
            invalid.push(Field::Quantity);
        }
        if !valid_restock_level(&restock_level) {
            invalid.push(Field::RestockLevel);
        }
        if !invalid.is_empty() {
            return Err(RecordError::InvalidFields(invalid));
        }

        Ok(Self {
            product_id,
            condition,
            quantity,
            restock_level,
            available,
        })
    }

    /// Check candidate fields against their domains.
    ///
    /// Does not stop at the first failure: the error names every invalid field.
    /// Absent fields count as invalid.
    pub fn validate(fields: &RecordFields) -> Result<Self, RecordError> {
        let get = |field: Field| fields.get(field.as_str());

        let product_id = integer(get(Field::ProductId)).filter(valid_product_id);
        let condition = get(Field::Condition)
            .and_then(Value::as_str)
            .and_then(|s| s.parse::<Condition>().ok());
        let quantity = integer(get(Field::Quantity)).filter(valid_quantity);
        let restock_level = integer(get(Field::RestockLevel)).filter(valid_restock_level);
        let available = integer(get(Field::Available)).and_then(flag);

        match (product_id, condition, quantity, restock_level, available) {
            (
                Some(product_id),
                Some(condition),
                Some(quantity),
                Some(restock_level),
                Some(available),
            ) => Ok(Self {
                product_id,
                condition,
                quantity,
                restock_level,
                available,
            }),
            _ => {
                let invalid = [
                    (Field::ProductId, product_id.is_none()),
                    (Field::Condition, condition.is_none()),
                    (Field::Quantity, quantity.is_none()),
                    (Field::RestockLevel, restock_level.is_none()),
                    (Field::Available, available.is_none()),
                ]
                .into_iter()
                .filter_map(|(field, bad)| bad.then_some(field))
                .collect();
                Err(RecordError::InvalidFields(invalid))
            }
        }
    }

    /// Parse a JSON payload carrying the five record keys. Extra keys are ignored.
    pub fn deserialize(payload: &Value) -> Result<Self, RecordError> {
        let fields = payload.as_object().ok_or(RecordError::BadShape)?;
        if let Some(missing) = Field::ALL
            .into_iter()
            .find(|f| !fields.contains_key(f.as_str()))
        {
            return Err(RecordError::MissingField(missing));
        }
        Self::validate(fields)
    }

    pub fn serialize(&self) -> Value {
        Value::Object(self.to_fields())
    }

    pub fn to_fields(&self) -> RecordFields {
        let mut fields = Map::with_capacity(Field::ALL.len());
        for field in Field::ALL {
            let value = match field {
                Field::ProductId => Value::from(self.product_id),
                Field::Condition => Value::from(self.condition.as_str()),
                Field::Quantity => Value::from(self.quantity),
                Field::RestockLevel => Value::from(self.restock_level),
                Field::Available => Value::from(i64::from(self.available)),
            };
            fields.insert(field.as_str().to_string(), value);
        }
        fields
    }

    /// Add `amount` to the quantity. Zero is accepted and changes nothing.
    pub fn restock(&self, amount: i64) -> Result<Self, RecordError> {
        if amount < 0 {
            return Err(RecordError::NegativeAmount(amount));
        }
        let quantity = self
            .quantity
            .checked_add(amount)
            .ok_or_else(|| RecordError::InvalidFields(vec![Field::Quantity]))?;
        Self::new(
            self.product_id,
            self.condition,
            quantity,
            self.restock_level,
            self.available,
        )
    }

    /// Mark the record available. Refused while nothing is in stock.
    pub fn activate(&self) -> Result<Self, RecordError> {
        if self.quantity == 0 {
            return Err(RecordError::OutOfStock(self.key()));
        }
        Ok(Self {
            available: true,
            ..self.clone()
        })
    }

    pub fn deactivate(&self) -> Self {
        Self {
            available: false,
            ..self.clone()
        }
    }

    /// Merge `patch` over the current fields and re-validate.
    ///
    /// Only the five record keys are taken from the patch. The record is
    /// forced unavailable when the merged quantity is zero.
    pub fn update(&self, patch: &Value) -> Result<Self, RecordError> {
        let patch = patch.as_object().ok_or(RecordError::BadShape)?;
        let mut merged = self.to_fields();
        for (key, value) in patch {
            if let Some(slot) = merged.get_mut(key) {
                *slot = value.clone();
            }
        }
        if integer(merged.get(Field::Quantity.as_str())) == Some(0) {
            merged.insert(Field::Available.as_str().to_string(), Value::from(0));
        }
        Self::validate(&merged)
    }

    /// Apply the stock rule: nothing in stock means not available.
    pub fn with_stock_rule(self) -> Self {
        if self.quantity == 0 {
            self.deactivate()
        } else {
            self
        }
    }

    pub fn product_id(&self) -> i64 {
        self.product_id
    }

    pub fn condition(&self) -> Condition {
        self.condition
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn restock_level(&self) -> i64 {
        self.restock_level
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    /// Stock has fallen below the restock threshold (advisory only).
    pub fn needs_restock(&self) -> bool {
        self.quantity < self.restock_level
    }
}

impl Entity for InventoryRecord {
    type Key = RecordKey;

    fn key(&self) -> RecordKey {
        RecordKey::new(self.product_id, self.condition)
    }
}
