//! Image upload and deletion orchestration.
//!
//! Ordering is the whole point here: the remote binary goes up first,
//! and only then does a row land in the database. A failed remote
//! upload therefore never leaves a dangling row, and a failed insert
//! triggers a compensating remote delete so the store does not leak
//! binaries either.

use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::repos::{Image, ImageRepo, NewImage};
use crate::db::DbError;
use crate::store::{ImageStore, StoreError};

/// Upload/delete error type
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Db(#[from] DbError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// One file pulled out of a multipart request.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// A failed file in a bulk upload, reported back to the client.
#[derive(Debug, Clone, Serialize)]
pub struct FailedUpload {
    pub filename: String,
    pub error: String,
}

/// Outcome of a bulk upload: per-file results plus aggregate counts.
#[derive(Debug, Serialize)]
pub struct BulkOutcome {
    pub uploaded: Vec<Image>,
    pub failed: Vec<FailedUpload>,
    pub total: usize,
    pub successful: usize,
}

/// Upload one file and persist its row.
///
/// On insert failure after a successful remote upload, the remote
/// object is deleted best-effort before the error propagates.
pub async fn upload_single(
    pool: &PgPool,
    store: &dyn ImageStore,
    property_id: Uuid,
    file: UploadedFile,
    description: Option<String>,
    make_thumbnail: bool,
) -> Result<Image, UploadError> {
    let stored = store.upload(&file.filename, file.bytes).await?;

    let repo = ImageRepo::new(pool);
    let created = repo
        .create(NewImage {
            property_id,
            url: stored.url.clone(),
            public_id: Some(stored.public_id.clone()),
            description,
        })
        .await;

    let image = match created {
        Ok(image) => image,
        Err(e) => {
            // Compensate so the remote store doesn't leak the binary.
            if let Err(del) = store.delete(&stored.public_id).await {
                tracing::warn!(
                    public_id = %stored.public_id,
                    error = %del,
                    "compensating remote delete failed; remote object leaked"
                );
            }
            return Err(e.into());
        }
    };

    if make_thumbnail {
        // The row was just inserted, so None can only mean a concurrent
        // delete won; return the plain row in that case.
        if let Some(thumb) = repo.set_thumbnail(image.id).await? {
            return Ok(thumb);
        }
    }

    Ok(image)
}

/// Upload many files for one property, each independently.
///
/// Files are processed sequentially; one failure does not abort the
/// rest, it just lands in `failed` with the original filename.
pub async fn upload_many(
    pool: &PgPool,
    store: &dyn ImageStore,
    property_id: Uuid,
    files: Vec<UploadedFile>,
    description: Option<String>,
) -> BulkOutcome {
    let total = files.len();
    let mut uploaded = Vec::new();
    let mut failed = Vec::new();

    for file in files {
        let filename = file.filename.clone();
        match upload_single(pool, store, property_id, file, description.clone(), false).await {
            Ok(image) => uploaded.push(image),
            Err(e) => {
                tracing::warn!(filename = %filename, error = %e, "bulk upload item failed");
                failed.push(FailedUpload {
                    filename,
                    error: e.to_string(),
                });
            }
        }
    }

    let successful = uploaded.len();
    BulkOutcome {
        uploaded,
        failed,
        total,
        successful,
    }
}

/// Delete an image row, then best-effort delete the remote binary.
///
/// The row deletion is authoritative: a failed remote delete is logged
/// and swallowed, never surfaced to the client.
pub async fn delete_image(
    pool: &PgPool,
    store: &dyn ImageStore,
    id: Uuid,
) -> Result<Option<Image>, UploadError> {
    let Some(image) = ImageRepo::new(pool).delete(id).await? else {
        return Ok(None);
    };

    if let Some(public_id) = &image.public_id {
        if let Err(e) = store.delete(public_id).await {
            tracing::warn!(public_id = %public_id, error = %e, "remote image delete failed");
        }
    }

    Ok(Some(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repos::ImageRepo;
    use crate::db::testutil;
    use crate::store::mock::MockStore;

    fn file(name: &str) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            bytes: vec![0xFF, 0xD8, 0xFF],
        }
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn failed_remote_upload_creates_no_row() {
        let pool = testutil::pool().await;
        let property_id = testutil::property(&pool).await;
        let store = MockStore::new();
        store.fail_upload("broken.jpg");

        let result =
            upload_single(&pool, &store, property_id, file("broken.jpg"), None, false).await;
        assert!(matches!(result, Err(UploadError::Store(_))));

        let images = ImageRepo::new(&pool)
            .list_for_property(property_id)
            .await
            .unwrap();
        assert!(images.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn failed_insert_compensates_remote_upload() {
        let pool = testutil::pool().await;
        let store = MockStore::new();

        // Nonexistent property makes the INSERT hit the foreign key.
        let result =
            upload_single(&pool, &store, Uuid::new_v4(), file("orphan.jpg"), None, false).await;
        assert!(matches!(result, Err(UploadError::Db(_))));

        // The remote binary went up, then was compensated away.
        assert_eq!(store.upload_count(), 1);
        assert_eq!(store.delete_count(), 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn upload_as_thumbnail_sets_the_flag() {
        let pool = testutil::pool().await;
        let property_id = testutil::property(&pool).await;
        let store = MockStore::new();

        let image = upload_single(&pool, &store, property_id, file("hero.jpg"), None, true)
            .await
            .unwrap();
        assert!(image.is_thumbnail);

        let thumb = ImageRepo::new(&pool)
            .thumbnail_for_property(property_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(thumb.id, image.id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn bulk_upload_reports_partial_failure() {
        let pool = testutil::pool().await;
        let property_id = testutil::property(&pool).await;
        let store = MockStore::new();
        store.fail_upload("b.jpg");

        let outcome = upload_many(
            &pool,
            &store,
            property_id,
            vec![file("a.jpg"), file("b.jpg"), file("c.jpg")],
            None,
        )
        .await;

        assert_eq!(outcome.total, 3);
        assert_eq!(outcome.successful, 2);
        assert_eq!(outcome.failed.len(), 1);
        assert_eq!(outcome.failed[0].filename, "b.jpg");

        let rows = ImageRepo::new(&pool)
            .list_for_property(property_id)
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_triggers_exactly_one_remote_delete() {
        let pool = testutil::pool().await;
        let property_id = testutil::property(&pool).await;
        let store = MockStore::new();

        let image = upload_single(&pool, &store, property_id, file("a.jpg"), None, false)
            .await
            .unwrap();
        let public_id = image.public_id.clone().unwrap();

        let deleted = delete_image(&pool, &store, image.id).await.unwrap().unwrap();
        assert_eq!(deleted.id, image.id);
        assert_eq!(store.deleted_ids(), vec![public_id]);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_without_public_id_skips_remote() {
        let pool = testutil::pool().await;
        let property_id = testutil::property(&pool).await;
        let store = MockStore::new();

        let image = ImageRepo::new(&pool)
            .create(NewImage {
                property_id,
                url: "https://elsewhere.example/1.jpg".into(),
                public_id: None,
                description: None,
            })
            .await
            .unwrap();

        delete_image(&pool, &store, image.id).await.unwrap().unwrap();
        assert_eq!(store.delete_count(), 0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_is_authoritative_even_when_remote_fails() {
        let pool = testutil::pool().await;
        let property_id = testutil::property(&pool).await;
        let store = MockStore::new();

        let image = upload_single(&pool, &store, property_id, file("a.jpg"), None, false)
            .await
            .unwrap();
        store
            .fail_deletes
            .store(true, std::sync::atomic::Ordering::SeqCst);

        // Remote failure is swallowed; the row is gone regardless.
        let deleted = delete_image(&pool, &store, image.id).await.unwrap();
        assert!(deleted.is_some());
        assert!(ImageRepo::new(&pool).get(image.id).await.unwrap().is_none());
    }
}
