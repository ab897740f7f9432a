//! Text protocol spoken with the card reader.
//!
//! Device → host: `[card_data]<uniqueID>;<money>;<points>;` per line.
//! Host → device: `<money>;<points>;` after an approved debit, or the single
//! error code `1` for anything else.

use crate::domain::card::CardId;
use crate::domain::event::{CardEvent, CardReading, FormatError, TransactionOutcome};
use std::fmt;

/// Tag that marks a line as card data.
pub const CARD_DATA_TAG: &str = "[card_data]";

pub const ERROR_CODE: u8 = 1;

const FIELD_NAMES: [&str; 3] = ["uniqueID", "money", "points"];

/// Classification of one line received from the reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Not card data (boot messages, debug prints). The reader keeps polling.
    Ignored,
    CardData(CardEvent),
}

/// Decodes one line with its trailing newline already stripped.
pub fn decode_line(line: &str) -> LineKind {
    match line.strip_prefix(CARD_DATA_TAG) {
        Some(payload) => LineKind::CardData(decode_payload(payload.trim())),
        None => LineKind::Ignored,
    }
}

fn decode_payload(payload: &str) -> CardEvent {
    match split_fields(payload) {
        Ok([unique_id, money, points]) => match (
            parse_number(FIELD_NAMES[1], money),
            parse_number(FIELD_NAMES[2], points),
        ) {
            (Ok(money), Ok(points)) => CardEvent::Presented(CardReading {
                unique_id: CardId::new(unique_id),
                money,
                points,
            }),
            (Err(e), _) | (_, Err(e)) => CardEvent::Malformed(e),
        },
        Err(e) => CardEvent::Malformed(e),
    }
}

/// Takes the first three semicolon-terminated fields. Anything after the
/// third semicolon is ignored.
fn split_fields(payload: &str) -> Result<[&str; 3], FormatError> {
    let mut fields = [""; 3];
    let mut rest = payload;

    for (i, slot) in fields.iter_mut().enumerate() {
        let Some((field, tail)) = rest.split_once(';') else {
            return Err(FormatError::MissingFields { found: i });
        };
        if field.is_empty() {
            return Err(FormatError::EmptyField {
                field: FIELD_NAMES[i],
            });
        }
        *slot = field;
        rest = tail;
    }

    Ok(fields)
}

/// Surrounding whitespace is tolerated; signs, separators and decimals are not.
fn parse_number(field: &'static str, value: &str) -> Result<u64, FormatError> {
    value.trim().parse().map_err(|_| FormatError::InvalidNumber {
        field,
        value: value.to_string(),
    })
}

/// What the host sends back to the reader after a transaction cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Approved { money: u64, points: u64 },
    Error,
}

impl Reply {
    pub fn encode(&self) -> Vec<u8> {
        self.to_string().into_bytes()
    }
}

impl From<TransactionOutcome> for Reply {
    fn from(outcome: TransactionOutcome) -> Self {
        match outcome {
            TransactionOutcome::Approved { money, points } => Reply::Approved { money, points },
            TransactionOutcome::Declined { .. } => Reply::Error,
        }
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Approved { money, points } => write!(f, "{};{};", money, points),
            Reply::Error => write!(f, "{}", ERROR_CODE),
        }
    }
}
