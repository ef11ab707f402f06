//! External image store client.
//!
//! Binary image content lives in a third-party hosted store, not in
//! Postgres; the database only keeps the returned URL and `public_id`.
//! The trait seam exists so upload orchestration can be tested with an
//! in-memory store.

use async_trait::async_trait;

pub mod http;

#[cfg(test)]
pub mod mock;

pub use http::HttpImageStore;

/// What the store hands back for an uploaded binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredImage {
    /// Stable, publicly servable URL.
    pub url: String,
    /// Store-side identifier, needed to delete the binary later.
    pub public_id: String,
}

/// Image store error type
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("image store request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("image store returned {status}: {message}")]
    Rejected { status: u16, message: String },
}

/// A remote store for image binaries.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Upload a binary, returning its URL and identifier.
    async fn upload(&self, filename: &str, bytes: Vec<u8>) -> Result<StoredImage, StoreError>;

    /// Delete a previously uploaded binary by identifier.
    async fn delete(&self, public_id: &str) -> Result<(), StoreError>;
}
