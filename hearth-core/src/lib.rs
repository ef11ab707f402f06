//! hearth-core: domain logic for the hearth rental marketplace
//!
//! Holds everything that does not need HTTP or a database connection:
//! configuration, booking price calculation, and dashboard report
//! aggregation. The server crate builds on top of this.

pub mod config;
pub mod pricing;
pub mod reports;

pub use config::AppConfig;
pub use pricing::{quote, Quote, QuoteError};
pub use reports::{summarize, BookingRecord, Summary};
