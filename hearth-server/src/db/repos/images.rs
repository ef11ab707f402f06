//! Image repository.
//!
//! Plain CRUD over the `images` table plus the one operation in this
//! system with a real invariant: `set_thumbnail`, which must leave at
//! most one image per property marked as thumbnail no matter how it
//! fails or interleaves.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// Image record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Image {
    pub id: Uuid,
    pub property_id: Uuid,
    pub url: String,
    /// External store identifier, used to delete the remote binary.
    pub public_id: Option<String>,
    pub description: Option<String>,
    pub is_thumbnail: bool,
    pub created_at: DateTime<Utc>,
}

/// Fields for inserting a new image row
#[derive(Debug, Clone)]
pub struct NewImage {
    pub property_id: Uuid,
    pub url: String,
    pub public_id: Option<String>,
    pub description: Option<String>,
}

/// Image repository
pub struct ImageRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ImageRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an image row. The remote binary must already be stored;
    /// `url` and `public_id` come from the external store's response.
    pub async fn create(&self, new: NewImage) -> Result<Image, DbError> {
        let image = sqlx::query_as(
            r#"
            INSERT INTO images (property_id, url, public_id, description)
            VALUES ($1, $2, $3, $4)
            RETURNING id, property_id, url, public_id, description, is_thumbnail, created_at
            "#,
        )
        .bind(new.property_id)
        .bind(&new.url)
        .bind(new.public_id.as_deref())
        .bind(new.description.as_deref())
        .fetch_one(self.pool)
        .await?;

        Ok(image)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Image>, DbError> {
        let image = sqlx::query_as(
            r#"
            SELECT id, property_id, url, public_id, description, is_thumbnail, created_at
            FROM images
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(image)
    }

    /// List all images of a property, thumbnail first.
    pub async fn list_for_property(&self, property_id: Uuid) -> Result<Vec<Image>, DbError> {
        let images = sqlx::query_as(
            r#"
            SELECT id, property_id, url, public_id, description, is_thumbnail, created_at
            FROM images
            WHERE property_id = $1
            ORDER BY is_thumbnail DESC, created_at ASC
            "#,
        )
        .bind(property_id)
        .fetch_all(self.pool)
        .await?;

        Ok(images)
    }

    /// The property's current thumbnail, if it has one.
    pub async fn thumbnail_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Option<Image>, DbError> {
        let image = sqlx::query_as(
            r#"
            SELECT id, property_id, url, public_id, description, is_thumbnail, created_at
            FROM images
            WHERE property_id = $1 AND is_thumbnail
            "#,
        )
        .bind(property_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(image)
    }

    /// Delete an image row, returning it so the caller can clean up the
    /// remote binary. The row deletion is authoritative; remote cleanup
    /// is the caller's (best-effort) problem.
    pub async fn delete(&self, id: Uuid) -> Result<Option<Image>, DbError> {
        let image = sqlx::query_as(
            r#"
            DELETE FROM images
            WHERE id = $1
            RETURNING id, property_id, url, public_id, description, is_thumbnail, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(image)
    }

    /// Mark an image as its property's thumbnail, clearing any other.
    ///
    /// Returns `Ok(None)` without writing anything when the id does not
    /// exist. Otherwise the clear and the set run in one transaction on a
    /// connection held for the duration, so a failure at any point rolls
    /// the whole operation back and concurrent calls cannot interleave a
    /// conflicting write between the two statements.
    pub async fn set_thumbnail(&self, id: Uuid) -> Result<Option<Image>, DbError> {
        let property_id: Option<(Uuid,)> =
            sqlx::query_as("SELECT property_id FROM images WHERE id = $1")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        let Some((property_id,)) = property_id else {
            return Ok(None);
        };

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            "UPDATE images SET is_thumbnail = FALSE WHERE property_id = $1 AND is_thumbnail",
        )
        .bind(property_id)
        .execute(&mut *tx)
        .await?;

        // The image can disappear between the lookup and this point;
        // treat that as not-found and let the drop roll the clear back.
        let image: Option<Image> = sqlx::query_as(
            r#"
            UPDATE images SET is_thumbnail = TRUE
            WHERE id = $1
            RETURNING id, property_id, url, public_id, description, is_thumbnail, created_at
            "#,
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(image) = image else {
            return Ok(None);
        };

        tx.commit().await?;
        Ok(Some(image))
    }
}
