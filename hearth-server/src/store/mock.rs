//! In-memory image store for tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use super::{ImageStore, StoreError, StoredImage};

/// Records every call; can be told to reject uploads by filename or to
/// fail deletes outright.
#[derive(Default)]
pub struct MockStore {
    counter: AtomicU64,
    pub uploads: Mutex<Vec<String>>,
    pub deletes: Mutex<Vec<String>>,
    pub fail_uploads_named: Mutex<Vec<String>>,
    pub fail_deletes: std::sync::atomic::AtomicBool,
}

impl MockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make uploads of this exact filename fail.
    pub fn fail_upload(&self, filename: &str) {
        self.fail_uploads_named
            .lock()
            .unwrap()
            .push(filename.to_string());
    }

    pub fn upload_count(&self) -> usize {
        self.uploads.lock().unwrap().len()
    }

    pub fn delete_count(&self) -> usize {
        self.deletes.lock().unwrap().len()
    }

    pub fn deleted_ids(&self) -> Vec<String> {
        self.deletes.lock().unwrap().clone()
    }
}

#[async_trait]
impl ImageStore for MockStore {
    async fn upload(&self, filename: &str, _bytes: Vec<u8>) -> Result<StoredImage, StoreError> {
        if self
            .fail_uploads_named
            .lock()
            .unwrap()
            .iter()
            .any(|f| f == filename)
        {
            return Err(StoreError::Rejected {
                status: 503,
                message: format!("injected failure for {filename}"),
            });
        }

        let n = self.counter.fetch_add(1, Ordering::SeqCst);
        self.uploads.lock().unwrap().push(filename.to_string());

        Ok(StoredImage {
            url: format!("https://mock.store/{n}"),
            public_id: format!("mock-{n}"),
        })
    }

    async fn delete(&self, public_id: &str) -> Result<(), StoreError> {
        self.deletes.lock().unwrap().push(public_id.to_string());
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected {
                status: 500,
                message: "injected delete failure".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn records_calls_and_injects_failures() {
        let store = MockStore::new();
        store.fail_upload("bad.jpg");

        let ok = store.upload("good.jpg", vec![1, 2, 3]).await.unwrap();
        assert_eq!(ok.public_id, "mock-0");

        let err = store.upload("bad.jpg", vec![4]).await.unwrap_err();
        assert!(matches!(err, StoreError::Rejected { status: 503, .. }));
        assert_eq!(store.upload_count(), 1);

        store.delete("mock-0").await.unwrap();
        assert_eq!(store.deleted_ids(), vec!["mock-0".to_string()]);
    }
}
