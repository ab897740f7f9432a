use crate::domain::card::Card;
use crate::domain::event::{CardReading, TransactionOutcome};
use crate::domain::ports::LedgerStoreBox;
use crate::error::{PosError, Result};
use log::{debug, info, warn};

/// Times an unknown card is provisioned before the lookup is given up on.
const PROVISIONING_RETRIES: usize = 1;

/// Applies guarded debits to the card ledger.
///
/// The ledger is authoritative: balances reported by the reader never
/// influence whether a debit is approved.
pub struct LedgerEngine {
    ledger: LedgerStoreBox,
}

impl LedgerEngine {
    /// Creates a new `LedgerEngine` instance.
    ///
    /// # Arguments
    ///
    /// * `ledger` - The store holding card balances.
    pub fn new(ledger: LedgerStoreBox) -> Self {
        Self { ledger }
    }

    /// Debits `price` from the card in `reading`, provisioning the card first
    /// if the ledger has never seen it.
    ///
    /// An insufficient balance is a `Declined` outcome and leaves the ledger
    /// untouched. Storage failures are returned as errors, as is a card that
    /// is still missing after being provisioned.
    ///
    /// # Arguments
    ///
    /// * `reading` - The card the reader saw. Its reported balance is only logged.
    /// * `price` - The amount to debit, in the ledger's currency unit.
    pub async fn transact(&self, reading: &CardReading, price: u64) -> Result<TransactionOutcome> {
        let unique_id = &reading.unique_id;
        let mut provisioned = 0;

        let mut card = loop {
            match self.ledger.get(unique_id).await? {
                Some(card) => break card,
                None if provisioned < PROVISIONING_RETRIES => {
                    warn!("unknown card {}", unique_id);
                    info!("adding new card to ledger");
                    self.ledger.put(Card::provision(unique_id.clone())).await?;
                    provisioned += 1;
                    info!("added new card, retrying transaction");
                }
                None => {
                    return Err(PosError::UnknownCardAfterProvisioning(
                        unique_id.to_string(),
                    ));
                }
            }
        };

        if card.money != reading.money || card.points != reading.points {
            debug!(
                "card {} reports {};{} but ledger holds {};{}",
                unique_id, reading.money, reading.points, card.money, card.points
            );
        }

        match card.debit(price) {
            Ok(()) => {}
            Err(PosError::InsufficientFunds { balance, price }) => {
                warn!("insufficient balance on card {}", unique_id);
                return Ok(TransactionOutcome::Declined { balance, price });
            }
            Err(e) => return Err(e),
        }

        let outcome = TransactionOutcome::Approved {
            money: card.money,
            points: card.points,
        };
        self.ledger.put(card).await?;

        Ok(outcome)
    }

    /// Every card in the ledger.
    pub async fn cards(&self) -> Result<Vec<Card>> {
        self.ledger.all().await
    }
}
