//! Payment proof upload validation.

use crate::error::OrdersError;

/// Upper size bound for a payment proof upload (2 MiB).
pub const MAX_PROOF_BYTES: usize = 2 * 1024 * 1024;

/// A payment proof image the customer uploads for a pending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentProof {
    /// Original file name.
    pub file_name: String,

    /// MIME type reported for the file.
    pub content_type: String,

    /// File contents.
    pub bytes: Vec<u8>,
}

impl PaymentProof {
    /// Creates a proof from an uploaded file.
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Validates the upload before it goes anywhere near the network:
    /// images only, at most [`MAX_PROOF_BYTES`].
    pub fn validate(&self) -> Result<(), OrdersError> {
        if !self.content_type.starts_with("image/") {
            return Err(OrdersError::InvalidProof(format!(
                "expected an image, got {}",
                self.content_type
            )));
        }
        if self.bytes.len() > MAX_PROOF_BYTES {
            return Err(OrdersError::InvalidProof(format!(
                "file is {} bytes, limit is {} bytes",
                self.bytes.len(),
                MAX_PROOF_BYTES
            )));
        }
        Ok(())
    }
}
