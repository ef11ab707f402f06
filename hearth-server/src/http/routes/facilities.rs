//! Facility endpoints.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get};
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{Facility, FacilityRepo, NewFacility, PropertyRepo};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::http::Envelope;
use crate::models::ValidationError;

#[derive(Deserialize)]
pub struct CreateFacilityRequest {
    pub name: String,
    #[serde(default = "default_condition")]
    pub condition: String,
    #[serde(default = "default_true")]
    pub is_available: bool,
}

fn default_condition() -> String {
    "good".to_string()
}

fn default_true() -> bool {
    true
}

/// GET /api/properties/{id}/facilities
async fn list_facilities(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Envelope<Vec<Facility>>>, ApiError> {
    let facilities = FacilityRepo::new(&state.pool)
        .list_for_property(property_id)
        .await?;

    Ok(Json(Envelope::ok(facilities)))
}

/// POST /api/properties/{id}/facilities - owner or admin only
async fn create_facility(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
    current: CurrentUser,
    Json(req): Json<CreateFacilityRequest>,
) -> Result<(StatusCode, Json<Envelope<Facility>>), ApiError> {
    if req.name.trim().is_empty() {
        return Err(ValidationError::Empty { field: "name" }.into());
    }

    let property = PropertyRepo::new(&state.pool)
        .get(property_id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "property",
            id: property_id.to_string(),
        })?;
    if property.owner_id != current.user.user_id && !current.user.is_admin {
        return Err(ApiError::Forbidden {
            reason: "not the property owner",
        });
    }

    let facility = FacilityRepo::new(&state.pool)
        .create(NewFacility {
            property_id,
            name: req.name.trim().to_string(),
            condition: req.condition,
            is_available: req.is_available,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::ok(facility))))
}

/// DELETE /api/facilities/{id} - owner or admin only
async fn delete_facility(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    current: CurrentUser,
) -> Result<Json<Envelope<Facility>>, ApiError> {
    let repo = FacilityRepo::new(&state.pool);
    let not_found = || ApiError::NotFound {
        resource: "facility",
        id: id.to_string(),
    };

    // Authorize against the owning property before deleting.
    let facility = repo.get(id).await?.ok_or_else(not_found)?;
    let property = PropertyRepo::new(&state.pool)
        .get(facility.property_id)
        .await?
        .ok_or_else(not_found)?;
    if property.owner_id != current.user.user_id && !current.user.is_admin {
        return Err(ApiError::Forbidden {
            reason: "not the property owner",
        });
    }

    let deleted = repo.delete(id).await?.ok_or_else(not_found)?;
    Ok(Json(Envelope::ok(deleted)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/properties/{id}/facilities",
            get(list_facilities).post(create_facility),
        )
        .route("/facilities/{id}", delete(delete_facility))
}
