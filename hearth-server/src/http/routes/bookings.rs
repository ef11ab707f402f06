//! Booking endpoints.
//!
//! The total is computed server-side from the property's nightly rate;
//! clients never supply an amount. Payment is simulated via explicit
//! payment_status updates.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use hearth_core::pricing::{self, QuoteError};

use crate::db::repos::{Booking, BookingRepo, BookingUpdate, NewBooking, PropertyRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{AdminUser, CurrentUser};
use crate::http::server::AppState;
use crate::http::Envelope;
use crate::models::{BookingStatus, PaymentStatus, ValidationError};

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub property_id: Uuid,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: i32,
}

#[derive(Deserialize, Default)]
pub struct UpdateBookingRequest {
    pub status: Option<String>,
    pub payment_status: Option<String>,
}

fn quote_error(e: QuoteError) -> ApiError {
    let validation = match e {
        QuoteError::EmptyDateRange => ValidationError::InvalidFormat {
            field: "check_out",
            reason: "check-out must be after check-in",
        },
        QuoteError::NoGuests => ValidationError::OutOfRange {
            field: "guests",
            min: 1,
            max: i64::from(i32::MAX),
        },
        QuoteError::TooManyGuests { max_guests, .. } => ValidationError::OutOfRange {
            field: "guests",
            min: 1,
            max: i64::from(max_guests),
        },
    };
    ApiError::Validation(validation)
}

/// POST /api/bookings - book a stay
async fn create_booking(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<(StatusCode, Json<Envelope<Booking>>), ApiError> {
    let property = PropertyRepo::new(&state.pool)
        .get(req.property_id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "property",
            id: req.property_id.to_string(),
        })?;

    if !property.is_available {
        return Err(ApiError::Conflict {
            reason: "property is not available for booking".to_string(),
        });
    }

    let quote = pricing::quote(
        property.price_per_night_cents,
        req.check_in,
        req.check_out,
        req.guests,
        property.max_guests,
    )
    .map_err(quote_error)?;

    let booking = BookingRepo::new(&state.pool)
        .create(NewBooking {
            property_id: property.id,
            user_id: current.user.user_id,
            check_in: req.check_in,
            check_out: req.check_out,
            guests: req.guests,
            total_amount_cents: quote.total_cents,
        })
        .await?;

    tracing::info!(booking_id = %booking.id, nights = quote.nights, "booking created");

    Ok((StatusCode::CREATED, Json(Envelope::ok(booking))))
}

/// The booking's guest or an admin; property data stays private otherwise.
fn authorize_booking(booking: &Booking, current: &CurrentUser) -> Result<(), ApiError> {
    if booking.user_id == current.user.user_id || current.user.is_admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden {
            reason: "not your booking",
        })
    }
}

/// GET /api/bookings/{id}
async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    current: CurrentUser,
) -> Result<Json<Envelope<Booking>>, ApiError> {
    let booking = BookingRepo::new(&state.pool)
        .get(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "booking",
            id: id.to_string(),
        })?;
    authorize_booking(&booking, &current)?;

    Ok(Json(Envelope::ok(booking)))
}

/// GET /api/bookings/user/{userId} - a user's booking history
async fn list_user_bookings(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<Uuid>,
    current: CurrentUser,
) -> Result<Json<Envelope<Vec<Booking>>>, ApiError> {
    if user_id != current.user.user_id && !current.user.is_admin {
        return Err(ApiError::Forbidden {
            reason: "not your bookings",
        });
    }

    let bookings = BookingRepo::new(&state.pool).list_for_user(user_id).await?;
    Ok(Json(Envelope::ok(bookings)))
}

/// PUT /api/bookings/{id} - admin edit of status / payment_status
async fn update_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    _admin: AdminUser,
    Json(req): Json<UpdateBookingRequest>,
) -> Result<Json<Envelope<Booking>>, ApiError> {
    let status = req
        .status
        .as_deref()
        .map(str::parse::<BookingStatus>)
        .transpose()?;
    let payment_status = req
        .payment_status
        .as_deref()
        .map(str::parse::<PaymentStatus>)
        .transpose()?;

    let booking = BookingRepo::new(&state.pool)
        .update(
            id,
            BookingUpdate {
                status,
                payment_status,
            },
        )
        .await?
        .ok_or(ApiError::NotFound {
            resource: "booking",
            id: id.to_string(),
        })?;

    Ok(Json(Envelope::ok(booking)))
}

/// POST /api/bookings/{id}/cancel - guest (or admin) cancels
async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    current: CurrentUser,
) -> Result<Json<Envelope<Booking>>, ApiError> {
    let repo = BookingRepo::new(&state.pool);
    let booking = repo.get(id).await?.ok_or(ApiError::NotFound {
        resource: "booking",
        id: id.to_string(),
    })?;
    authorize_booking(&booking, &current)?;

    let cancelled = repo
        .update(
            id,
            BookingUpdate {
                status: Some(BookingStatus::Cancelled),
                payment_status: None,
            },
        )
        .await?
        .ok_or(ApiError::NotFound {
            resource: "booking",
            id: id.to_string(),
        })?;

    Ok(Json(Envelope::ok(cancelled)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/bookings", post(create_booking))
        .route("/bookings/{id}", get(get_booking).put(update_booking))
        .route("/bookings/{id}/cancel", post(cancel_booking))
        .route("/bookings/user/{user_id}", get(list_user_bookings))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_errors_map_to_validation() {
        let err = quote_error(QuoteError::EmptyDateRange);
        assert!(matches!(err, ApiError::Validation(_)));

        let err = quote_error(QuoteError::TooManyGuests {
            guests: 9,
            max_guests: 4,
        });
        let ApiError::Validation(ValidationError::OutOfRange { field, max, .. }) = err else {
            panic!("expected out-of-range validation error");
        };
        assert_eq!(field, "guests");
        assert_eq!(max, 4);
    }
}
