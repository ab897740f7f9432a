use crate::domain::card::{Card, CardId};
use crate::domain::ports::LedgerStore;
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A ledger kept in process memory.
///
/// Clones share the same table, so a test can keep a handle to inspect the
/// ledger after giving another clone to the engine. Nothing survives a restart.
#[derive(Default, Clone)]
pub struct InMemoryLedger {
    cards: Arc<RwLock<HashMap<CardId, Card>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger pre-populated with `cards`.
    pub fn with_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let table = cards
            .into_iter()
            .map(|card| (card.unique_id.clone(), card))
            .collect();
        Self {
            cards: Arc::new(RwLock::new(table)),
        }
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedger {
    async fn get(&self, unique_id: &CardId) -> Result<Option<Card>> {
        let cards = self.cards.read().await;
        Ok(cards.get(unique_id).cloned())
    }

    async fn put(&self, card: Card) -> Result<()> {
        let mut cards = self.cards.write().await;
        cards.insert(card.unique_id.clone(), card);
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Card>> {
        let cards = self.cards.read().await;
        let mut all: Vec<Card> = cards.values().cloned().collect();
        all.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
        Ok(all)
    }
}
