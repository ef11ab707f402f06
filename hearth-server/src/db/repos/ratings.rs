//! Rating repository.
//!
//! One rating per (user, property) pair, enforced by a unique
//! constraint rather than a client-side check.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// Rating record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Rating {
    pub id: Uuid,
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Fields for creating a rating
#[derive(Debug, Clone)]
pub struct NewRating {
    pub user_id: Uuid,
    pub property_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

/// Rating repository
pub struct RatingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> RatingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a rating; a second rating for the same (user, property)
    /// pair comes back as a conflict.
    pub async fn create(&self, new: NewRating) -> Result<Rating, DbError> {
        let result = sqlx::query_as(
            r#"
            INSERT INTO ratings (user_id, property_id, rating, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, property_id, rating, comment, created_at
            "#,
        )
        .bind(new.user_id)
        .bind(new.property_id)
        .bind(new.rating)
        .bind(new.comment.as_deref())
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(rating) => Ok(rating),
            Err(e) => {
                let err = DbError::from(e);
                if err.is_unique_violation() {
                    Err(DbError::Conflict {
                        reason: "property already rated by this user".to_string(),
                    })
                } else {
                    Err(err)
                }
            }
        }
    }

    pub async fn list_for_property(&self, property_id: Uuid) -> Result<Vec<Rating>, DbError> {
        let ratings = sqlx::query_as(
            r#"
            SELECT id, user_id, property_id, rating, comment, created_at
            FROM ratings
            WHERE property_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(property_id)
        .fetch_all(self.pool)
        .await?;

        Ok(ratings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::testutil;

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_rating_is_a_conflict() {
        let pool = testutil::pool().await;
        let property_id = testutil::property(&pool).await;
        let user_id = testutil::user(&pool).await;
        let repo = RatingRepo::new(&pool);

        let new = NewRating {
            user_id,
            property_id,
            rating: 4,
            comment: Some("lovely stay".into()),
        };
        repo.create(new.clone()).await.unwrap();

        let err = repo.create(new).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        // The first rating is the one that stuck
        let ratings = repo.list_for_property(property_id).await.unwrap();
        assert_eq!(ratings.len(), 1);
        assert_eq!(ratings[0].rating, 4);
    }
}
