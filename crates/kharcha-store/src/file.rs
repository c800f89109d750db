//! JSON blob file store

use crate::{StoreError, StoredTransaction, TransactionStore};
use async_trait::async_trait;
use std::path::PathBuf;

/// Store backed by a single JSON file on disk
///
/// The previous blob is copied to `<file>.bak` before every overwrite.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store for the given blob file path
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path of the backup written before each save
    fn backup_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "transactions.json".to_string());
        name.push_str(".bak");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl TransactionStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<StoredTransaction>, StoreError> {
        if !self.path.exists() {
            log::debug!("Blob file not found: {}, treating as empty", self.path.display());
            return Ok(Vec::new());
        }

        let content = tokio::fs::read_to_string(&self.path).await?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        serde_json::from_str(&content).map_err(|e| StoreError::InvalidBlob {
            message: e.to_string(),
        })
    }

    async fn save(&self, transactions: &[StoredTransaction]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        if self.path.exists() {
            tokio::fs::copy(&self.path, self.backup_path()).await?;
        }

        let content =
            serde_json::to_string_pretty(transactions).map_err(|e| StoreError::InvalidBlob {
                message: e.to_string(),
            })?;
        tokio::fs::write(&self.path, content).await?;

        log::debug!(
            "Saved {} transactions to {}",
            transactions.len(),
            self.path.display()
        );
        Ok(())
    }
}
