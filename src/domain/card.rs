use crate::error::PosError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Balance given to a card the first time the ledger sees it.
pub const DEFAULT_MONEY: u64 = 1000;
/// Loyalty points given to a card the first time the ledger sees it.
pub const DEFAULT_POINTS: u64 = 0;

/// The identity a reader reports for a card, used as the ledger key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for CardId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl AsRef<str> for CardId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A ledger record: the authoritative balance and loyalty points of one card.
///
/// Amounts are in the smallest currency unit. Unsigned storage keeps both
/// fields non-negative.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Card {
    pub unique_id: CardId,
    pub money: u64,
    pub points: u64,
}

impl Card {
    pub fn new(unique_id: CardId, money: u64, points: u64) -> Self {
        Self {
            unique_id,
            money,
            points,
        }
    }

    /// The record created for a card that has never been seen before.
    pub fn provision(unique_id: CardId) -> Self {
        Self::new(unique_id, DEFAULT_MONEY, DEFAULT_POINTS)
    }

    /// Debits `price` if the balance covers it. Leaves the card untouched otherwise.
    pub fn debit(&mut self, price: u64) -> Result<(), PosError> {
        match self.money.checked_sub(price) {
            Some(remaining) => {
                self.money = remaining;
                Ok(())
            }
            None => Err(PosError::InsufficientFunds {
                balance: self.money,
                price,
            }),
        }
    }
}
