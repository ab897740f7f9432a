use clap::Parser;
use log::{info, warn};
use miette::{IntoDiagnostic, Result};
use rfid_till::application::engine::LedgerEngine;
use rfid_till::application::session::Terminal;
use rfid_till::domain::ports::LedgerStoreBox;
use rfid_till::infrastructure::in_memory::InMemoryLedger;
#[cfg(feature = "storage-rocksdb")]
use rfid_till::infrastructure::rocksdb::RocksDbLedger;
use rfid_till::interfaces::console::Console;
use rfid_till::interfaces::serial::link::{SerialLink, SerialSettings};
use rfid_till::interfaces::serial::reader::CardReader;
use rfid_till::shutdown::Shutdown;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser)]
#[command(author, version, about = "Point-of-sale till for a serial RFID card reader", long_about = None)]
struct Cli {
    /// Serial device the card reader is attached to
    #[arg(long, env = "RFID_DEVICE", default_value = "/dev/ttyACM0")]
    device: String,

    /// Line speed of the reader
    #[arg(long, env = "RFID_BAUD_RATE", default_value_t = 9600)]
    baud_rate: u32,

    /// How long a single read attempt waits for a full line
    #[arg(long, env = "RFID_READ_TIMEOUT_MS", default_value_t = 1000)]
    read_timeout_ms: u64,

    /// Pause between polls while the reader has nothing to send
    #[arg(long, env = "RFID_IDLE_BACKOFF_MS", default_value_t = 20)]
    idle_backoff_ms: u64,

    /// Path to the persistent card ledger. If omitted, the ledger lives in memory.
    #[arg(long, env = "RFID_DB_PATH")]
    db_path: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let ledger = open_ledger(cli.db_path)?;

    let settings = SerialSettings {
        device: cli.device,
        baud_rate: cli.baud_rate,
        read_timeout: Duration::from_millis(cli.read_timeout_ms),
    };
    let link = SerialLink::open(&settings).into_diagnostic()?;
    info!("listening on {} at {} baud", settings.device, settings.baud_rate);

    let (trigger, mut shutdown) = Shutdown::channel();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("shutdown requested, press Ctrl-C again to exit immediately");
            trigger.trigger();
            if tokio::signal::ctrl_c().await.is_ok() {
                std::process::exit(130);
            }
        }
    });

    let mut terminal = Terminal::new(
        LedgerEngine::new(ledger),
        CardReader::new(link, Duration::from_millis(cli.idle_backoff_ms)),
    );
    let mut console = Console::new(
        tokio::io::BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    );

    terminal
        .run(&mut console, &mut shutdown)
        .await
        .into_diagnostic()?;

    let cards = terminal.engine().cards().await.into_diagnostic()?;
    info!("ledger holds {} cards", cards.len());

    Ok(())
}

fn open_ledger(db_path: Option<PathBuf>) -> Result<LedgerStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let ledger = RocksDbLedger::open(path).into_diagnostic()?;
            Ok(Box::new(ledger))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            eprintln!(
                "WARNING: Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to In-Memory storage."
            );
            Ok(Box::new(InMemoryLedger::new()))
        }
        None => {
            warn!("no --db-path given, card balances will not survive a restart");
            Ok(Box::new(InMemoryLedger::new()))
        }
    }
}
