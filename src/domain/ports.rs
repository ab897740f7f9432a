use super::card::{Card, CardId};
use crate::error::Result;
use async_trait::async_trait;

/// Persistent table of card id → balance record.
///
/// `put` is insert-or-update keyed by `unique_id`, so a key maps to at most one
/// card. Implementations must not return from `put` before the write is durable.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    async fn get(&self, unique_id: &CardId) -> Result<Option<Card>>;
    async fn put(&self, card: Card) -> Result<()>;
    async fn all(&self) -> Result<Vec<Card>>;
}

pub type LedgerStoreBox = Box<dyn LedgerStore>;
