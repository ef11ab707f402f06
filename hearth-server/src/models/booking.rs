//! Booking status enums.
//!
//! Stored as lowercase text in the database. Transitions happen only via
//! explicit update calls (cancel, admin edit); there is no automatic
//! expiry.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Lifecycle status of a booking
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Ongoing,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "ongoing" => Ok(Self::Ongoing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ValidationError::InvalidVariant {
                field: "status",
                value: other.to_string(),
            }),
        }
    }
}

/// Payment state of a booking (payments are simulated)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "failed" => Ok(Self::Failed),
            "refunded" => Ok(Self::Refunded),
            other => Err(ValidationError::InvalidVariant {
                field: "payment_status",
                value: other.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_str() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            BookingStatus::Ongoing,
            BookingStatus::Completed,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(status.as_str().parse::<BookingStatus>().unwrap(), status);
        }
    }

    #[test]
    fn rejects_unknown_variant() {
        let err = "expired".parse::<BookingStatus>().unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidVariant {
                field: "status",
                value: "expired".to_string()
            }
        );
        assert!("chargeback".parse::<PaymentStatus>().is_err());
    }

    #[test]
    fn serde_uses_lowercase() {
        let json = serde_json::to_string(&BookingStatus::Confirmed).unwrap();
        assert_eq!(json, "\"confirmed\"");
        let back: PaymentStatus = serde_json::from_str("\"refunded\"").unwrap();
        assert_eq!(back, PaymentStatus::Refunded);
    }
}
