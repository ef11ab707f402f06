//! Facility repository.

use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// Facility record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Facility {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    /// Free-text condition category, e.g. "good" or "needs repair".
    pub condition: String,
    pub is_available: bool,
}

/// Fields for creating a facility
#[derive(Debug, Clone)]
pub struct NewFacility {
    pub property_id: Uuid,
    pub name: String,
    pub condition: String,
    pub is_available: bool,
}

/// Facility repository
pub struct FacilityRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> FacilityRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewFacility) -> Result<Facility, DbError> {
        let facility = sqlx::query_as(
            r#"
            INSERT INTO facilities (property_id, name, condition, is_available)
            VALUES ($1, $2, $3, $4)
            RETURNING id, property_id, name, condition, is_available
            "#,
        )
        .bind(new.property_id)
        .bind(&new.name)
        .bind(&new.condition)
        .bind(new.is_available)
        .fetch_one(self.pool)
        .await?;

        Ok(facility)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Facility>, DbError> {
        let facility = sqlx::query_as(
            r#"
            SELECT id, property_id, name, condition, is_available
            FROM facilities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(facility)
    }

    pub async fn list_for_property(&self, property_id: Uuid) -> Result<Vec<Facility>, DbError> {
        let facilities = sqlx::query_as(
            r#"
            SELECT id, property_id, name, condition, is_available
            FROM facilities
            WHERE property_id = $1
            ORDER BY name ASC
            "#,
        )
        .bind(property_id)
        .fetch_all(self.pool)
        .await?;

        Ok(facilities)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Facility>, DbError> {
        let facility = sqlx::query_as(
            r#"
            DELETE FROM facilities
            WHERE id = $1
            RETURNING id, property_id, name, condition, is_available
            "#,
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(facility)
    }
}
