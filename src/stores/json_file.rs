//! Implements a [TransactionStorage] backed by a single JSON file.

use std::{
    fs,
    io::ErrorKind,
    path::{Path, PathBuf},
};

use crate::{Error, stores::TransactionStorage, transaction::Transaction};

/// Stores transactions as a pretty-printed JSON array in one file.
///
/// The whole file is rewritten on every save. There is no locking or atomic
/// rename, so only one process should write to the file at a time.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Create a storage for the file at `path`.
    ///
    /// The file does not need to exist yet, but its parent directory does.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The path of the JSON file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TransactionStorage for JsonFileStorage {
    fn load(&self) -> Vec<Transaction> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(error) if error.kind() == ErrorKind::NotFound => {
                tracing::info!(
                    "No data file at {}, starting with no transactions",
                    self.path.display()
                );
                return Vec::new();
            }
            Err(error) => {
                tracing::error!("Failed to read {}: {error}", self.path.display());
                return Vec::new();
            }
        };

        if text.trim().is_empty() {
            return Vec::new();
        }

        let records: Vec<serde_json::Value> = match serde_json::from_str(&text) {
            Ok(records) => records,
            Err(error) => {
                tracing::error!(
                    "Failed to parse transactions in {}: {error}",
                    self.path.display()
                );
                return Vec::new();
            }
        };

        records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| {
                match serde_json::from_value::<Transaction>(record) {
                    Ok(transaction) => Some(transaction),
                    Err(error) => {
                        tracing::warn!(
                            "Skipping invalid transaction at index {index} in {}: {error}",
                            self.path.display()
                        );
                        None
                    }
                }
            })
            .collect()
    }

    fn save(&self, transactions: &[Transaction]) -> Result<(), Error> {
        let json = serde_json::to_string_pretty(transactions)
            .map_err(|error| Error::JSONSerializationError(error.to_string()))?;

        fs::write(&self.path, json).map_err(|error| {
            Error::StorageError(format!("could not write {}: {error}", self.path.display()))
        })
    }
}
