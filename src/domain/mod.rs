//! Domain model: cards, reader events, transaction outcomes and the ledger port.

pub mod card;
pub mod event;
pub mod ports;
