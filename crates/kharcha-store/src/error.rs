//! Error types for kharcha-store

use thiserror::Error;

/// Storage error type
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid blob format: {message}")]
    InvalidBlob { message: String },

    #[error("Endpoint error: {message}")]
    Endpoint { message: String },

    #[error("Endpoint returned HTTP {status}")]
    EndpointStatus { status: u16 },
}

/// Result type with StoreError
pub type StoreResult<T> = Result<T, StoreError>;
