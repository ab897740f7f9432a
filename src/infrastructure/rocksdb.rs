use crate::domain::card::{Card, CardId};
use crate::domain::ports::LedgerStore;
use crate::error::{PosError, Result};
use async_trait::async_trait;
use log::{debug, info};
use rocksdb::{ColumnFamily, ColumnFamilyDescriptor, DB, Options, WriteOptions};
use std::path::Path;
use std::sync::Arc;

/// Column Family holding one JSON record per card, keyed by card id.
pub const CF_CARDS: &str = "cards";

/// A persistent ledger backed by RocksDB.
///
/// `Clone` shares the underlying `Arc<DB>`. Every put is synced to disk
/// before it returns.
#[derive(Clone)]
pub struct RocksDbLedger {
    db: Arc<DB>,
}

impl RocksDbLedger {
    /// Opens or creates a ledger at the specified path.
    ///
    /// Creates the `cards` column family on first use, so a fresh directory
    /// is a valid, empty ledger.
    ///
    /// # Arguments
    ///
    /// * `path` - The filesystem path where the ledger will be stored.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        match DB::list_cf(&opts, path) {
            Ok(existing) if existing.iter().any(|name| name == CF_CARDS) => {
                info!("Ledger table exists at {}", path.display());
            }
            Ok(_) => info!("Initializing ledger table at {}", path.display()),
            Err(e) => {
                debug!("Could not list column families at {}: {}", path.display(), e);
                info!("Initializing ledger table at {}", path.display());
            }
        }

        let cf_cards = ColumnFamilyDescriptor::new(CF_CARDS, Options::default());
        let db = DB::open_cf_descriptors(&opts, path, vec![cf_cards])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cards(&self) -> Result<&ColumnFamily> {
        self.db.cf_handle(CF_CARDS).ok_or_else(|| {
            PosError::InternalError(Box::new(std::io::Error::other(
                "Cards column family not found",
            )))
        })
    }
}

#[async_trait]
impl LedgerStore for RocksDbLedger {
    async fn get(&self, unique_id: &CardId) -> Result<Option<Card>> {
        let cf = self.cards()?;
        match self.db.get_cf(cf, unique_id.as_str().as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn put(&self, card: Card) -> Result<()> {
        let cf = self.cards()?;
        let value = serde_json::to_vec(&card)?;

        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(true);
        self.db
            .put_cf_opt(cf, card.unique_id.as_str().as_bytes(), value, &write_opts)?;

        Ok(())
    }

    async fn all(&self) -> Result<Vec<Card>> {
        let cf = self.cards()?;
        let mut cards = Vec::new();

        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            cards.push(serde_json::from_slice(&value)?);
        }

        Ok(cards)
    }
}
