use crate::domain::merchant::{MerchantIdentity, valid_tags};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, KhqrError>;

#[derive(Error, Debug)]
pub enum KhqrError {
    #[error("Valid amount is required")]
    InvalidAmount(String),
    #[error("Invalid request body: {0}")]
    InvalidRequest(String),
    #[error("Invalid ID. Use one of: {}", valid_tags())]
    InvalidIdentity(String),
    #[error("No QR code has been generated for {0} yet.")]
    NotFound(MerchantIdentity),
    #[error("payload has no checksum field")]
    MissingChecksum,
    #[error("checksum mismatch: expected {expected}, found {found}")]
    ChecksumMismatch { expected: String, found: String },
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl KhqrError {
    /// Returns true for errors caused by caller-supplied input.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            KhqrError::InvalidAmount(_)
                | KhqrError::InvalidRequest(_)
                | KhqrError::InvalidIdentity(_)
        )
    }
}
