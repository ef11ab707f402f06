//! Property repository.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use crate::models::{Paginated, Pagination};

use super::DbError;

const COLUMNS: &str = "id, owner_id, title, description, price_per_night_cents, location, \
     category, bedrooms, bathrooms, max_guests, is_available, is_featured, created_at, updated_at";

/// Property record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Property {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_night_cents: i64,
    pub location: String,
    pub category: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub max_guests: i32,
    pub is_available: bool,
    pub is_featured: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a property
#[derive(Debug, Clone)]
pub struct NewProperty {
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub price_per_night_cents: i64,
    pub location: String,
    pub category: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub max_guests: i32,
}

/// Partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct PropertyUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_per_night_cents: Option<i64>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub max_guests: Option<i32>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
}

/// List filters; all optional, combined with AND.
#[derive(Debug, Clone, Default)]
pub struct PropertyFilter {
    pub category: Option<String>,
    pub location: Option<String>,
    pub available_only: bool,
    pub featured_only: bool,
}

/// Property repository
pub struct PropertyRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PropertyRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewProperty) -> Result<Property, DbError> {
        let property = sqlx::query_as(&format!(
            r#"
            INSERT INTO properties
                (owner_id, title, description, price_per_night_cents, location, category,
                 bedrooms, bathrooms, max_guests)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(new.owner_id)
        .bind(&new.title)
        .bind(&new.description)
        .bind(new.price_per_night_cents)
        .bind(&new.location)
        .bind(&new.category)
        .bind(new.bedrooms)
        .bind(new.bathrooms)
        .bind(new.max_guests)
        .fetch_one(self.pool)
        .await?;

        Ok(property)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Property>, DbError> {
        let property = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM properties WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(property)
    }

    /// List properties with filters and pagination.
    ///
    /// Window function gives the filtered total in the same query.
    pub async fn list(
        &self,
        filter: &PropertyFilter,
        page: Pagination,
    ) -> Result<Paginated<Property>, DbError> {
        let rows = sqlx::query(&format!(
            r#"
            SELECT {COLUMNS}, COUNT(*) OVER() as total
            FROM properties
            WHERE ($1::text IS NULL OR category = $1)
              AND ($2::text IS NULL OR location ILIKE '%' || $2 || '%')
              AND (NOT $3 OR is_available)
              AND (NOT $4 OR is_featured)
            ORDER BY is_featured DESC, created_at DESC
            LIMIT $5 OFFSET $6
            "#,
        ))
        .bind(filter.category.as_deref())
        .bind(filter.location.as_deref())
        .bind(filter.available_only)
        .bind(filter.featured_only)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool)
        .await?;

        let total = rows.first().map(|r| r.get::<i64, _>("total")).unwrap_or(0);
        let items = rows
            .into_iter()
            .map(|r| Property::from_row(&r))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Paginated {
            items,
            total,
            page: page.page,
            per_page: page.per_page,
        })
    }

    /// COALESCE-style partial update.
    pub async fn update(&self, id: Uuid, update: PropertyUpdate) -> Result<Option<Property>, DbError> {
        let property = sqlx::query_as(&format!(
            r#"
            UPDATE properties SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                price_per_night_cents = COALESCE($4, price_per_night_cents),
                location = COALESCE($5, location),
                category = COALESCE($6, category),
                bedrooms = COALESCE($7, bedrooms),
                bathrooms = COALESCE($8, bathrooms),
                max_guests = COALESCE($9, max_guests),
                is_available = COALESCE($10, is_available),
                is_featured = COALESCE($11, is_featured),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(update.title.as_deref())
        .bind(update.description.as_deref())
        .bind(update.price_per_night_cents)
        .bind(update.location.as_deref())
        .bind(update.category.as_deref())
        .bind(update.bedrooms)
        .bind(update.bathrooms)
        .bind(update.max_guests)
        .bind(update.is_available)
        .bind(update.is_featured)
        .fetch_optional(self.pool)
        .await?;

        Ok(property)
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<Property>, DbError> {
        let property = sqlx::query_as(&format!(
            "DELETE FROM properties WHERE id = $1 RETURNING {COLUMNS}",
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(property)
    }
}
