use thiserror::Error;

#[derive(Error, Debug)]
pub enum PosError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Serial port error: {0}")]
    SerialError(#[from] serialport::Error),
    #[cfg(feature = "storage-rocksdb")]
    #[error("Storage error: {0}")]
    StorageError(#[from] rocksdb::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Insufficient balance: {balance} available, {price} requested")]
    InsufficientFunds { balance: u64, price: u64 },
    #[error("Card {0} is still missing from the ledger after provisioning")]
    UnknownCardAfterProvisioning(String),
    #[error("Invalid price: {0}")]
    InvalidPrice(String),
    #[error("Internal error: {0}")]
    InternalError(Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T> = std::result::Result<T, PosError>;
