//! Domain model types shared across the HTTP and repository layers

pub mod booking;
pub mod pagination;
pub mod validation;

pub use booking::{BookingStatus, PaymentStatus};
pub use pagination::{Paginated, Pagination};
pub use validation::ValidationError;
