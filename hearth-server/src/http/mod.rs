//! HTTP layer: router, error mapping, extractors, route handlers

pub mod error;
pub mod extractors;
pub mod routes;
pub mod server;

use serde::Serialize;

pub use error::ApiError;
pub use server::{run_server, AppState, ServerConfig};

/// The JSON envelope every endpoint answers with:
/// `{ success, data?, message? }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_envelope_omits_message() {
        let json = serde_json::to_value(Envelope::ok(42)).unwrap();
        assert_eq!(json, serde_json::json!({ "success": true, "data": 42 }));
    }
}
