use std::fmt;
use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("scenario id must be a positive integer")]
pub struct ScenarioIdError;

/// Positive scenario identifier. Ascending ids define presentation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct ScenarioId(NonZeroU32);

impl ScenarioId {
    pub fn new(id: u32) -> Result<Self, ScenarioIdError> {
        NonZeroU32::new(id).map(Self).ok_or(ScenarioIdError)
    }

    #[must_use]
    pub fn value(self) -> u32 {
        self.0.get()
    }
}

impl TryFrom<u32> for ScenarioId {
    type Error = ScenarioIdError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ScenarioId> for u32 {
    fn from(value: ScenarioId) -> Self {
        value.value()
    }
}

impl fmt::Display for ScenarioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("option id must not be empty")]
pub struct OptionIdError;

/// Identifier of one of the two options offered by a scenario (`red`, `left`, `ferris-wheel`, ...).
///
/// Invariant: non-empty after trimming.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OptionId(String);

impl OptionId {
    pub fn new(value: impl Into<String>) -> Result<Self, OptionIdError> {
        let value = value.into();
        if value.trim().is_empty() {
            Err(OptionIdError)
        } else {
            Ok(Self(value))
        }
    }

    /// Build an id from a compile-time literal.
    ///
    /// Panics on an empty literal, which is a programming error.
    #[must_use]
    pub fn from_static(value: &'static str) -> Self {
        assert!(!value.trim().is_empty(), "OptionId literal must not be empty");
        Self(value.to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OptionId {
    type Error = OptionIdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<OptionId> for String {
    fn from(value: OptionId) -> Self {
        value.0
    }
}

impl AsRef<str> for OptionId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl PartialEq<str> for OptionId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for OptionId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque, stable participant identifier. Regenerated on every session reset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParticipantId(String);

impl ParticipantId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Monotonic token that invalidates callbacks scheduled under an older session context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Epoch(u64);

impl Epoch {
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    #[must_use]
    pub const fn value(self) -> u64 {
        self.0
    }

    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::{Epoch, OptionId, ScenarioId};

    #[test]
    fn scenario_id_rejects_zero() {
        assert!(ScenarioId::new(0).is_err());
        assert_eq!(ScenarioId::new(7).map(ScenarioId::value), Ok(7));
    }

    #[test]
    fn scenario_id_deserializes_from_integer() {
        let id: ScenarioId = serde_json::from_str("3").unwrap();
        assert_eq!(id.value(), 3);
        assert!(serde_json::from_str::<ScenarioId>("0").is_err());
    }

    #[test]
    fn option_id_rejects_blank() {
        assert!(OptionId::new("   ").is_err());
        assert_eq!(OptionId::new("red").unwrap(), "red");
    }

    #[test]
    fn epoch_increments() {
        let epoch = Epoch::default();
        assert_eq!(epoch.next().value(), 1);
        assert!(epoch.next() > epoch);
    }
}
