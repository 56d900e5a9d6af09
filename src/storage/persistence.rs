//! Ledger persistence layer
//!
//! The core defines no durable format of its own; durability belongs to the
//! hosting environment. This store is that environment for the CLI: it
//! snapshots the ledger to pretty-printed JSON and writes through a
//! temporary file so a crashed save never truncates the previous snapshot.

use crate::ledger::TokenLedger;
use std::fs;
use std::io::{self, BufReader, BufWriter};
use std::path::Path;
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub data_dir: std::path::PathBuf,
    pub ledger_file: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".ledger_data"),
            ledger_file: "ledger.json".to_string(),
        }
    }
}

/// Ledger snapshot store
pub struct LedgerStore {
    config: StoreConfig,
}

impl LedgerStore {
    /// Create a new store, creating the data directory if needed
    pub fn new(config: StoreConfig) -> Result<Self, StoreError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StoreError> {
        Self::new(StoreConfig::default())
    }

    /// Get the ledger file path
    fn ledger_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.ledger_file)
    }

    /// Save the ledger to disk
    pub fn save(&self, ledger: &TokenLedger) -> Result<(), StoreError> {
        // Write to temporary file first
        let temp_path = self.config.data_dir.join("ledger.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, ledger)?;

        // Atomic rename
        fs::rename(&temp_path, self.ledger_path())?;

        Ok(())
    }

    /// Load the ledger from disk
    pub fn load(&self) -> Result<TokenLedger, StoreError> {
        let path = self.ledger_path();

        if !path.exists() {
            return Err(StoreError::InvalidData(
                "Ledger file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let ledger: TokenLedger = serde_json::from_reader(reader)?;
        Ok(ledger)
    }

    /// Check if a saved ledger exists
    pub fn exists(&self) -> bool {
        self.ledger_path().exists()
    }

    /// Delete the saved ledger
    pub fn delete(&self) -> Result<(), StoreError> {
        let path = self.ledger_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// Save a ledger snapshot to a specific file path
pub fn save_to_file(ledger: &TokenLedger, path: &Path) -> Result<(), StoreError> {
    let file = fs::File::create(path)?;
    let writer = BufWriter::new(file);
    serde_json::to_writer_pretty(writer, ledger)?;
    Ok(())
}

/// Load a ledger snapshot from a specific file path
pub fn load_from_file(path: &Path) -> Result<TokenLedger, StoreError> {
    let file = fs::File::open(path)?;
    let reader = BufReader::new(file);
    let ledger: TokenLedger = serde_json::from_reader(reader)?;
    Ok(ledger)
}
