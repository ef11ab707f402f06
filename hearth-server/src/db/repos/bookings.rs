//! Booking repository.
//!
//! A booking is a stay request with a status pair (lifecycle + payment).
//! Amounts are integer cents, computed server-side at creation time.

use chrono::{DateTime, NaiveDate, Utc};
use hearth_core::reports::BookingRecord;
use serde::Serialize;
use sqlx::{FromRow, PgPool, Row};
use uuid::Uuid;

use crate::models::{BookingStatus, PaymentStatus};

use super::DbError;

const COLUMNS: &str = "id, property_id, user_id, check_in, check_out, guests, \
     total_amount_cents, status, payment_status, created_at, updated_at";

/// Booking record from database
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Booking {
    pub id: Uuid,
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub total_amount_cents: i64,
    pub status: String,
    pub payment_status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for creating a booking
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub property_id: Uuid,
    pub user_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
    pub total_amount_cents: i64,
}

/// Partial status update; `None` leaves the column untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct BookingUpdate {
    pub status: Option<BookingStatus>,
    pub payment_status: Option<PaymentStatus>,
}

/// Booking repository
pub struct BookingRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> BookingRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new: NewBooking) -> Result<Booking, DbError> {
        let booking = sqlx::query_as(&format!(
            r#"
            INSERT INTO bookings
                (property_id, user_id, check_in, check_out, guests, total_amount_cents)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(new.property_id)
        .bind(new.user_id)
        .bind(new.check_in)
        .bind(new.check_out)
        .bind(new.guests)
        .bind(new.total_amount_cents)
        .fetch_one(self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn get(&self, id: Uuid) -> Result<Option<Booking>, DbError> {
        let booking = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM bookings WHERE id = $1",
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(booking)
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Booking>, DbError> {
        let bookings = sqlx::query_as(&format!(
            "SELECT {COLUMNS} FROM bookings WHERE user_id = $1 ORDER BY created_at DESC",
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        Ok(bookings)
    }

    pub async fn update(&self, id: Uuid, update: BookingUpdate) -> Result<Option<Booking>, DbError> {
        let booking = sqlx::query_as(&format!(
            r#"
            UPDATE bookings SET
                status = COALESCE($2, status),
                payment_status = COALESCE($3, payment_status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {COLUMNS}
            "#,
        ))
        .bind(id)
        .bind(update.status.map(|s| s.as_str()))
        .bind(update.payment_status.map(|s| s.as_str()))
        .fetch_optional(self.pool)
        .await?;

        Ok(booking)
    }

    /// All bookings joined to their property's category, as dashboard
    /// rollup input.
    pub async fn records_for_summary(&self) -> Result<Vec<BookingRecord>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT b.check_in, p.category, b.total_amount_cents, b.status, b.payment_status
            FROM bookings b
            JOIN properties p ON p.id = b.property_id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| BookingRecord {
                check_in: r.get("check_in"),
                category: r.get("category"),
                total_cents: r.get("total_amount_cents"),
                status: r.get("status"),
                payment_status: r.get("payment_status"),
            })
            .collect())
    }
}
