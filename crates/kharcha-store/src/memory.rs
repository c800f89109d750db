//! In-process store, mainly for tests

use crate::{StoreError, StoredTransaction, TransactionStore};
use async_trait::async_trait;
use std::sync::RwLock;

/// Store that keeps the blob in memory
#[derive(Default)]
pub struct MemoryStore {
    blob: RwLock<Vec<StoredTransaction>>,
}

impl MemoryStore {
    /// Create a store pre-populated with the given transactions
    pub fn with_transactions(transactions: Vec<StoredTransaction>) -> Self {
        Self {
            blob: RwLock::new(transactions),
        }
    }
}

#[async_trait]
impl TransactionStore for MemoryStore {
    async fn load(&self) -> Result<Vec<StoredTransaction>, StoreError> {
        Ok(self.blob.read().unwrap().clone())
    }

    async fn save(&self, transactions: &[StoredTransaction]) -> Result<(), StoreError> {
        *self.blob.write().unwrap() = transactions.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_roundtrip() {
        let store = MemoryStore::default();
        assert!(store.load().await.unwrap().is_empty());

        let transactions = vec![StoredTransaction {
            date_time: "2026-08-07T12:00".to_string(),
            kind: "Debit".to_string(),
            amount: 99.0,
            remarks: "chai".to_string(),
        }];
        store.save(&transactions).await.unwrap();
        assert_eq!(store.load().await.unwrap(), transactions);

        store.save(&[]).await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
