//! Booking price calculation.
//!
//! All money is integer cents; the database stores cents and the API
//! serializes cents. Nothing in here touches floating point.

use chrono::NaiveDate;
use thiserror::Error;

/// A priced booking quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub nights: i64,
    pub total_cents: i64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum QuoteError {
    #[error("check-out must be after check-in")]
    EmptyDateRange,

    #[error("guest count must be at least 1")]
    NoGuests,

    #[error("guest count {guests} exceeds maximum of {max_guests}")]
    TooManyGuests { guests: i32, max_guests: i32 },
}

/// Price a stay: nights between the dates times the nightly rate.
///
/// The range is half-open, so a Friday-to-Sunday stay is two nights.
pub fn quote(
    price_per_night_cents: i64,
    check_in: NaiveDate,
    check_out: NaiveDate,
    guests: i32,
    max_guests: i32,
) -> Result<Quote, QuoteError> {
    let nights = (check_out - check_in).num_days();
    if nights < 1 {
        return Err(QuoteError::EmptyDateRange);
    }
    if guests < 1 {
        return Err(QuoteError::NoGuests);
    }
    if guests > max_guests {
        return Err(QuoteError::TooManyGuests { guests, max_guests });
    }

    Ok(Quote {
        nights,
        total_cents: nights * price_per_night_cents,
    })
}
