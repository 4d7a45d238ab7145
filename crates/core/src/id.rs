//! Strongly-typed identifiers used across the domain.
//!
//! Identifiers are positive integers assigned by the backing store. Zero is
//! reserved for "missing" on the wire and never names a real record.

use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Identifier of a registered user (sellers, buyers and message participants).
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

/// Identifier of a listed item.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(i64);

/// Identifier of an item category.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(i64);

/// Identifier of a purchase record in the transaction log.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PurchaseId(i64);

/// Identifier of a message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageId(i64);

macro_rules! impl_int_newtype {
    ($t:ty, $name:literal) => {
        impl $t {
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            pub const fn get(self) -> i64 {
                self.0
            }

            /// Reject the zero/negative values callers use for "missing".
            pub fn parse_valid(value: i64) -> Result<Self, DomainError> {
                if value <= 0 {
                    return Err(DomainError::invalid_id(format!(
                        "{}: must be a positive integer, got {}",
                        $name, value
                    )));
                }
                Ok(Self(value))
            }

            pub fn is_valid(self) -> bool {
                self.0 > 0
            }
        }

        impl core::fmt::Display for $t {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                core::fmt::Display::fmt(&self.0, f)
            }
        }

        impl From<$t> for i64 {
            fn from(value: $t) -> Self {
                value.0
            }
        }

        impl FromStr for $t {
            type Err = DomainError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = i64::from_str(s.trim())
                    .map_err(|e| DomainError::invalid_id(format!("{}: {}", $name, e)))?;
                Self::parse_valid(value)
            }
        }
    };
}

impl_int_newtype!(UserId, "UserId");
impl_int_newtype!(ItemId, "ItemId");
impl_int_newtype!(CategoryId, "CategoryId");
impl_int_newtype!(PurchaseId, "PurchaseId");
impl_int_newtype!(MessageId, "MessageId");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_zero_and_negative() {
        assert!(ItemId::parse_valid(0).is_err());
        assert!(UserId::parse_valid(-4).is_err());
        assert_eq!(ItemId::parse_valid(10).unwrap().get(), 10);
    }

    #[test]
    fn from_str_trims_and_validates() {
        assert_eq!(" 42 ".parse::<ItemId>().unwrap(), ItemId::new(42));
        assert!(matches!("abc".parse::<UserId>(), Err(DomainError::InvalidId(_))));
        assert!(matches!("0".parse::<UserId>(), Err(DomainError::InvalidId(_))));
    }

    #[test]
    fn serializes_as_bare_integer() {
        let json = serde_json::to_string(&ItemId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
