//! Remote JSON blob store
//!
//! Talks to a single blob endpoint, such as a Google Apps Script web app:
//! GET returns the whole list, POST overwrites it. The endpoint wraps GET
//! responses in a `{"status": ..., "transactions": [...]}` envelope; a bare
//! JSON array is accepted too.

use crate::{StoreError, StoredTransaction, TransactionStore};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Store backed by a remote JSON blob endpoint
pub struct RemoteBlobStore {
    client: reqwest::Client,
    url: String,
}

/// GET response envelope used by the blob endpoint
#[derive(Debug, Deserialize)]
struct BlobEnvelope {
    status: String,
    #[serde(default)]
    transactions: Vec<StoredTransaction>,
    #[serde(default)]
    message: Option<String>,
}

/// Decode a blob response body: envelope first, bare array as fallback
pub fn decode_blob(body: &str) -> Result<Vec<StoredTransaction>, StoreError> {
    if let Ok(envelope) = serde_json::from_str::<BlobEnvelope>(body) {
        if envelope.status == "success" {
            return Ok(envelope.transactions);
        }
        return Err(StoreError::Endpoint {
            message: envelope
                .message
                .unwrap_or_else(|| format!("endpoint status: {}", envelope.status)),
        });
    }

    serde_json::from_str(body).map_err(|e| StoreError::InvalidBlob {
        message: e.to_string(),
    })
}

impl RemoteBlobStore {
    /// Create a store for the given endpoint URL
    pub fn new(url: String, timeout_secs: u64) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| StoreError::Endpoint {
                message: e.to_string(),
            })?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl TransactionStore for RemoteBlobStore {
    async fn load(&self) -> Result<Vec<StoredTransaction>, StoreError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| StoreError::Endpoint {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::EndpointStatus {
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| StoreError::Endpoint {
            message: e.to_string(),
        })?;
        decode_blob(&body)
    }

    async fn save(&self, transactions: &[StoredTransaction]) -> Result<(), StoreError> {
        let response = self
            .client
            .post(&self.url)
            .json(transactions)
            .send()
            .await
            .map_err(|e| StoreError::Endpoint {
                message: e.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::EndpointStatus {
                status: status.as_u16(),
            });
        }

        log::debug!("Saved {} transactions to {}", transactions.len(), self.url);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_envelope() {
        let body = r#"{
            "status": "success",
            "transactions": [
                {"dateTime": "2026-08-07T10:00", "type": "Credit", "amount": 100.0, "remarks": "x"}
            ]
        }"#;
        let transactions = decode_blob(body).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].kind, "Credit");
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = r#"{"status": "error", "message": "sheet missing"}"#;
        let result = decode_blob(body);
        match result {
            Err(StoreError::Endpoint { message }) => assert_eq!(message, "sheet missing"),
            other => panic!("unexpected result: {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_decode_bare_array() {
        let body = r#"[{"dateTime": "2026-01-01T00:00", "type": "Debit", "amount": 5.0}]"#;
        let transactions = decode_blob(body).unwrap();
        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].remarks, "");
    }

    #[test]
    fn test_decode_envelope_without_transactions() {
        let body = r#"{"status": "success"}"#;
        let transactions = decode_blob(body).unwrap();
        assert!(transactions.is_empty());
    }

    #[test]
    fn test_decode_garbage() {
        assert!(matches!(
            decode_blob("not json"),
            Err(StoreError::InvalidBlob { .. })
        ));
    }
}
