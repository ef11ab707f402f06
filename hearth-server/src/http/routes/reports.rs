//! Admin dashboard endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use hearth_core::reports::{self, Summary};

use crate::db::repos::BookingRepo;
use crate::http::error::ApiError;
use crate::http::extractors::AdminUser;
use crate::http::server::AppState;
use crate::http::Envelope;

/// GET /api/reports/summary - monthly and category revenue rollups
async fn summary(
    State(state): State<Arc<AppState>>,
    _admin: AdminUser,
) -> Result<Json<Envelope<Summary>>, ApiError> {
    let records = BookingRepo::new(&state.pool).records_for_summary().await?;
    let summary = reports::summarize(&records);

    Ok(Json(Envelope::ok(summary)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/reports/summary", get(summary))
}
