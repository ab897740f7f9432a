use super::card::CardId;
use thiserror::Error;

/// Fields a reader reported for a card it saw.
///
/// `money` and `points` come from the card itself and are advisory; the
/// ledger holds the authoritative values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardReading {
    pub unique_id: CardId,
    pub money: u64,
    pub points: u64,
}

/// Why a `[card_data]` line could not be turned into a reading.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// Fewer than three semicolon-terminated fields.
    #[error("expected 3 fields, found {found}")]
    MissingFields { found: usize },
    #[error("field '{field}' is empty")]
    EmptyField { field: &'static str },
    #[error("field '{field}' is not a whole number: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// One card-presence event decoded from the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEvent {
    Presented(CardReading),
    Malformed(FormatError),
}

/// Result of a debit attempt against the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionOutcome {
    /// Post-debit balance and points.
    Approved { money: u64, points: u64 },
    /// The ledger balance did not cover the price; nothing was written.
    Declined { balance: u64, price: u64 },
}

impl TransactionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TransactionOutcome::Approved { .. })
    }
}
