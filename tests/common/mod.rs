#![allow(dead_code)]

use rfid_till::application::engine::LedgerEngine;
use rfid_till::application::session::{SessionSummary, Terminal};
use async_trait::async_trait;
use rfid_till::domain::card::{Card, CardId};
use rfid_till::domain::event::CardReading;
use rfid_till::domain::ports::{LedgerStore, LedgerStoreBox};
use rfid_till::error::Result;
use rfid_till::infrastructure::in_memory::InMemoryLedger;
use rfid_till::interfaces::console::Console;
use rfid_till::interfaces::serial::link::ScriptedLink;
use rfid_till::interfaces::serial::reader::CardReader;
use rfid_till::shutdown::Shutdown;
use std::time::Duration;

pub fn reading(id: &str) -> CardReading {
    CardReading {
        unique_id: CardId::from(id),
        money: 1000,
        points: 0,
    }
}

/// Everything a till session produced.
pub struct SessionRun {
    pub summary: SessionSummary,
    pub replies: Vec<String>,
    pub console: String,
}

/// Like `run_session`, but hands back the session result instead of
/// requiring success.
pub async fn try_run_session(
    ledger: LedgerStoreBox,
    prices: &str,
    lines: &[&str],
) -> (Result<SessionSummary>, Vec<String>) {
    let mut terminal = Terminal::new(
        LedgerEngine::new(ledger),
        CardReader::new(
            ScriptedLink::new(lines.iter().copied()),
            Duration::from_millis(1),
        ),
    );
    let mut console = Console::new(prices.as_bytes(), Vec::new());
    let (_trigger, mut shutdown) = Shutdown::channel();

    let result = terminal.run(&mut console, &mut shutdown).await;
    (result, replies_of(terminal))
}

/// Runs a full session with `prices` typed at the console and `lines`
/// arriving from the reader.
pub async fn run_session(ledger: LedgerStoreBox, prices: &str, lines: &[&str]) -> SessionRun {
    let mut terminal = Terminal::new(
        LedgerEngine::new(ledger),
        CardReader::new(
            ScriptedLink::new(lines.iter().copied()),
            Duration::from_millis(1),
        ),
    );
    let mut console = Console::new(prices.as_bytes(), Vec::new());
    let (_trigger, mut shutdown) = Shutdown::channel();

    let summary = terminal
        .run(&mut console, &mut shutdown)
        .await
        .expect("session failed");
    let (_, output) = console.into_inner();

    SessionRun {
        summary,
        replies: replies_of(terminal),
        console: String::from_utf8(output).unwrap(),
    }
}

pub fn replies_of(terminal: Terminal<ScriptedLink>) -> Vec<String> {
    let (_, reader) = terminal.into_parts();
    reader
        .into_link()
        .written()
        .iter()
        .map(|bytes| String::from_utf8(bytes.clone()).unwrap())
        .collect()
}

/// Accepts every write and forgets it.
pub struct ForgetfulLedger;

#[async_trait]
impl LedgerStore for ForgetfulLedger {
    async fn get(&self, _unique_id: &CardId) -> Result<Option<Card>> {
        Ok(None)
    }

    async fn put(&self, _card: Card) -> Result<()> {
        Ok(())
    }

    async fn all(&self) -> Result<Vec<Card>> {
        Ok(Vec::new())
    }
}

/// Serves reads from an in-memory ledger and fails every write.
pub struct ReadOnlyLedger(pub InMemoryLedger);

#[async_trait]
impl LedgerStore for ReadOnlyLedger {
    async fn get(&self, unique_id: &CardId) -> Result<Option<Card>> {
        self.0.get(unique_id).await
    }

    async fn put(&self, _card: Card) -> Result<()> {
        Err(std::io::Error::other("disk full").into())
    }

    async fn all(&self) -> Result<Vec<Card>> {
        self.0.all().await
    }
}
