//! Transaction blob storage
//!
//! Every backend holds the full transaction list as a single JSON blob.
//! There are only two operations: load the whole list and overwrite the
//! whole list. Last write wins.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod error;
pub mod file;
pub mod memory;
pub mod remote;

pub use error::StoreError;
pub use file::JsonFileStore;
pub use memory::MemoryStore;
pub use remote::RemoteBlobStore;

/// Store reference type
pub type StoreRef = Arc<dyn TransactionStore>;

/// Wire-level transaction record
///
/// Field names match the blob format spreadsheet endpoints serve: camelCase
/// keys, the type as a free string, remarks optional. Records are accepted
/// as-is on load; validation happens at entry time only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredTransaction {
    /// Entry timestamp, as entered ("YYYY-MM-DDTHH:MM")
    pub date_time: String,
    /// "Credit" or "Debit"
    #[serde(rename = "type")]
    pub kind: String,
    /// Entry amount
    pub amount: f64,
    /// Free-text remarks
    #[serde(default)]
    pub remarks: String,
}

// ==================== Store Trait ====================

/// Trait for transaction blob stores
#[async_trait]
pub trait TransactionStore: Send + Sync {
    /// Fetch the whole blob. A store with no blob yet returns an empty list.
    async fn load(&self) -> Result<Vec<StoredTransaction>, StoreError>;

    /// Overwrite the whole blob with the given list.
    async fn save(&self, transactions: &[StoredTransaction]) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_transaction_wire_keys() {
        let tx = StoredTransaction {
            date_time: "2026-08-07T21:30".to_string(),
            kind: "Credit".to_string(),
            amount: 1500.0,
            remarks: "salary".to_string(),
        };

        let json = serde_json::to_string(&tx).unwrap();
        assert!(json.contains("\"dateTime\""));
        assert!(json.contains("\"type\""));
        assert!(json.contains("\"amount\""));
        assert!(json.contains("\"remarks\""));

        let back: StoredTransaction = serde_json::from_str(&json).unwrap();
        assert_eq!(back, tx);
    }

    #[test]
    fn test_stored_transaction_missing_remarks() {
        let json = r#"{"dateTime":"2026-08-07T10:00","type":"Debit","amount":42.5}"#;
        let tx: StoredTransaction = serde_json::from_str(json).unwrap();
        assert_eq!(tx.remarks, "");
        assert_eq!(tx.kind, "Debit");
    }
}
