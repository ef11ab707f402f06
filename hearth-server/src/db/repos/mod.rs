//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Parameterized single statements for plain CRUD
//! - COALESCE for partial updates (no read-modify-write)
//! - A transaction on a dedicated connection for multi-step operations

pub mod bookings;
pub mod facilities;
pub mod images;
pub mod properties;
pub mod ratings;
pub mod users;

pub use bookings::{Booking, BookingRepo, BookingUpdate, NewBooking};
pub use facilities::{Facility, FacilityRepo, NewFacility};
pub use images::{Image, ImageRepo, NewImage};
pub use properties::{NewProperty, Property, PropertyFilter, PropertyRepo, PropertyUpdate};
pub use ratings::{NewRating, Rating, RatingRepo};
pub use users::{Session, SessionUser, User, UserRepo};

/// Database error type shared by all repositories
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    #[error("conflict: {reason}")]
    Conflict { reason: String },
}

impl DbError {
    /// True when the underlying Postgres error is a unique-constraint hit.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            DbError::Sqlx(sqlx::Error::Database(e)) => e.is_unique_violation(),
            _ => false,
        }
    }
}
