//! Rating endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{NewRating, Rating, RatingRepo};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::http::Envelope;
use crate::models::ValidationError;

#[derive(Deserialize)]
pub struct CreateRatingRequest {
    pub property_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
}

/// POST /api/ratings - one per (user, property); duplicates are 400
async fn create_rating(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(req): Json<CreateRatingRequest>,
) -> Result<(StatusCode, Json<Envelope<Rating>>), ApiError> {
    if !(1..=5).contains(&req.rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating",
            min: 1,
            max: 5,
        }
        .into());
    }

    let rating = RatingRepo::new(&state.pool)
        .create(NewRating {
            user_id: current.user.user_id,
            property_id: req.property_id,
            rating: req.rating,
            comment: req.comment,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::ok(rating))))
}

/// GET /api/properties/{id}/ratings
async fn list_ratings(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Envelope<Vec<Rating>>>, ApiError> {
    let ratings = RatingRepo::new(&state.pool)
        .list_for_property(property_id)
        .await?;

    Ok(Json(Envelope::ok(ratings)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ratings", post(create_rating))
        .route("/properties/{id}/ratings", get(list_ratings))
}
