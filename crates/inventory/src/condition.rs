use core::str::FromStr;

use thiserror::Error;

use stockroom_core::ValueObject;

/// Physical condition of the stocked item. Part of a record's identity.
///
/// Variants are declared in the alphabetical order of their wire form so the
/// derived ordering matches a database sorting by the text column.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Condition {
    New,
    OpenBox,
    Used,
}

impl Condition {
    pub const ALL: [Condition; 3] = [Condition::New, Condition::Used, Condition::OpenBox];

    /// Canonical wire form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::New => "new",
            Condition::Used => "used",
            Condition::OpenBox => "open box",
        }
    }
}

impl ValueObject for Condition {}

impl core::fmt::Display for Condition {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown condition {0:?}, expected one of: new, used, open box")]
pub struct UnknownCondition(pub String);

impl FromStr for Condition {
    type Err = UnknownCondition;

    /// Case-insensitive; surrounding whitespace is ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Condition::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| UnknownCondition(s.to_string()))
    }
}
