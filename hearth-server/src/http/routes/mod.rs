//! Route handlers organized by resource

pub mod auth;
pub mod bookings;
pub mod facilities;
pub mod health;
pub mod images;
pub mod properties;
pub mod ratings;
pub mod reports;
