use super::engine::LedgerEngine;
use crate::domain::event::CardEvent;
use crate::error::{PosError, Result};
use crate::interfaces::console::Console;
use crate::interfaces::serial::codec::Reply;
use crate::interfaces::serial::link::CardLink;
use crate::interfaces::serial::reader::CardReader;
use crate::shutdown::Shutdown;
use log::{error, info};
use tokio::io::{AsyncBufRead, AsyncWrite};

/// Tally of how each transaction cycle of a session ended.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SessionSummary {
    pub approved: usize,
    pub declined: usize,
    /// Card data that could not be decoded.
    pub rejected: usize,
    /// Transactions aborted by a storage failure.
    pub failed: usize,
}

/// One till: prompts for a price, waits for a card, debits it and tells the
/// reader how it went. Cycles run strictly one after another.
pub struct Terminal<L: CardLink> {
    engine: LedgerEngine,
    reader: CardReader<L>,
}

impl<L: CardLink> Terminal<L> {
    pub fn new(engine: LedgerEngine, reader: CardReader<L>) -> Self {
        Self { engine, reader }
    }

    /// Runs transaction cycles until the console input ends or `shutdown` fires.
    ///
    /// Only a card that vanishes after provisioning, or a failure talking to
    /// the reader or console, ends the session with an error.
    pub async fn run<R, W>(
        &mut self,
        console: &mut Console<R, W>,
        shutdown: &mut Shutdown,
    ) -> Result<SessionSummary>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut summary = SessionSummary::default();
        console.banner().await?;

        loop {
            let price = tokio::select! {
                price = console.prompt_price() => price?,
                _ = shutdown.wait() => None,
            };
            let Some(price) = price else { break };

            console.ask_for_card().await?;
            let Some(event) = self.reader.next_event(shutdown).await? else {
                break;
            };

            let reply = match event {
                CardEvent::Malformed(e) => {
                    summary.rejected += 1;
                    console.say(&format!("[error] invalid card_data: {}", e)).await?;
                    Reply::Error
                }
                CardEvent::Presented(reading) => {
                    match self.engine.transact(&reading, price).await {
                        Ok(outcome) => {
                            console.report(&outcome).await?;
                            if outcome.is_success() {
                                summary.approved += 1;
                            } else {
                                summary.declined += 1;
                            }
                            Reply::from(outcome)
                        }
                        Err(e @ PosError::UnknownCardAfterProvisioning(_)) => {
                            self.reader.send_reply(&Reply::Error)?;
                            return Err(e);
                        }
                        Err(e) => {
                            error!("transaction aborted: {}", e);
                            summary.failed += 1;
                            console.say(&format!("[error] transaction aborted: {}", e)).await?;
                            Reply::Error
                        }
                    }
                }
            };

            self.reader.send_reply(&reply)?;
            console.end_cycle().await?;
        }

        info!(
            "session closed: {} approved, {} declined, {} rejected, {} failed",
            summary.approved, summary.declined, summary.rejected, summary.failed
        );
        Ok(summary)
    }

    pub fn engine(&self) -> &LedgerEngine {
        &self.engine
    }

    pub fn into_parts(self) -> (LedgerEngine, CardReader<L>) {
        (self.engine, self.reader)
    }
}
