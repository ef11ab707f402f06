//! Property endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use uuid::Uuid;

use crate::db::repos::{NewProperty, Property, PropertyFilter, PropertyRepo, PropertyUpdate};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::http::Envelope;
use crate::models::{Paginated, Pagination, ValidationError};

/// List query: filters plus pagination, all optional.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub category: Option<String>,
    pub location: Option<String>,
    #[serde(default)]
    pub available: bool,
    #[serde(default)]
    pub featured: bool,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

#[derive(Deserialize)]
pub struct CreatePropertyRequest {
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price_per_night_cents: i64,
    pub location: String,
    pub category: String,
    #[serde(default = "one")]
    pub bedrooms: i32,
    #[serde(default = "one")]
    pub bathrooms: i32,
    #[serde(default = "two")]
    pub max_guests: i32,
}

fn one() -> i32 {
    1
}
fn two() -> i32 {
    2
}

#[derive(Deserialize, Default)]
pub struct UpdatePropertyRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_per_night_cents: Option<i64>,
    pub location: Option<String>,
    pub category: Option<String>,
    pub bedrooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub max_guests: Option<i32>,
    pub is_available: Option<bool>,
    pub is_featured: Option<bool>,
}

fn validate_create(req: &CreatePropertyRequest) -> Result<(), ValidationError> {
    if req.title.trim().is_empty() {
        return Err(ValidationError::Empty { field: "title" });
    }
    if req.location.trim().is_empty() {
        return Err(ValidationError::Empty { field: "location" });
    }
    if req.category.trim().is_empty() {
        return Err(ValidationError::Empty { field: "category" });
    }
    if req.price_per_night_cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price_per_night_cents",
            min: 0,
            max: i64::MAX,
        });
    }
    if req.max_guests < 1 {
        return Err(ValidationError::OutOfRange {
            field: "max_guests",
            min: 1,
            max: i64::from(i32::MAX),
        });
    }
    Ok(())
}

/// Owner or admin may modify a property; everyone else gets 403.
fn authorize_owner(property: &Property, current: &CurrentUser) -> Result<(), ApiError> {
    if property.owner_id == current.user.user_id || current.user.is_admin {
        Ok(())
    } else {
        Err(ApiError::Forbidden {
            reason: "not the property owner",
        })
    }
}

/// GET /api/properties - list with filters and pagination
async fn list_properties(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ListParams>,
) -> Result<Json<Envelope<Paginated<Property>>>, ApiError> {
    let filter = PropertyFilter {
        category: params.category,
        location: params.location,
        available_only: params.available,
        featured_only: params.featured,
    };
    let page = Pagination::new(
        params.page.unwrap_or(1),
        params.per_page.unwrap_or(Pagination::default().per_page),
    );

    let result = PropertyRepo::new(&state.pool).list(&filter, page).await?;
    Ok(Json(Envelope::ok(result)))
}

/// POST /api/properties - create, owned by the caller
async fn create_property(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
    Json(req): Json<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<Envelope<Property>>), ApiError> {
    validate_create(&req)?;

    let property = PropertyRepo::new(&state.pool)
        .create(NewProperty {
            owner_id: current.user.user_id,
            title: req.title.trim().to_string(),
            description: req.description,
            price_per_night_cents: req.price_per_night_cents,
            location: req.location.trim().to_string(),
            category: req.category.trim().to_string(),
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            max_guests: req.max_guests,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(Envelope::ok(property))))
}

/// GET /api/properties/{id}
async fn get_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
) -> Result<Json<Envelope<Property>>, ApiError> {
    let property = PropertyRepo::new(&state.pool)
        .get(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "property",
            id: id.to_string(),
        })?;

    Ok(Json(Envelope::ok(property)))
}

/// PUT /api/properties/{id} - COALESCE-style partial update
async fn update_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    current: CurrentUser,
    Json(req): Json<UpdatePropertyRequest>,
) -> Result<Json<Envelope<Property>>, ApiError> {
    let repo = PropertyRepo::new(&state.pool);
    let existing = repo.get(id).await?.ok_or(ApiError::NotFound {
        resource: "property",
        id: id.to_string(),
    })?;
    authorize_owner(&existing, &current)?;

    let updated = repo
        .update(
            id,
            PropertyUpdate {
                title: req.title,
                description: req.description,
                price_per_night_cents: req.price_per_night_cents,
                location: req.location,
                category: req.category,
                bedrooms: req.bedrooms,
                bathrooms: req.bathrooms,
                max_guests: req.max_guests,
                is_available: req.is_available,
                is_featured: req.is_featured,
            },
        )
        .await?
        .ok_or(ApiError::NotFound {
            resource: "property",
            id: id.to_string(),
        })?;

    Ok(Json(Envelope::ok(updated)))
}

/// DELETE /api/properties/{id}
async fn delete_property(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    current: CurrentUser,
) -> Result<Json<Envelope<Property>>, ApiError> {
    let repo = PropertyRepo::new(&state.pool);
    let existing = repo.get(id).await?.ok_or(ApiError::NotFound {
        resource: "property",
        id: id.to_string(),
    })?;
    authorize_owner(&existing, &current)?;

    let deleted = repo.delete(id).await?.ok_or(ApiError::NotFound {
        resource: "property",
        id: id.to_string(),
    })?;

    Ok(Json(Envelope::ok(deleted)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/properties", get(list_properties).post(create_property))
        .route(
            "/properties/{id}",
            get(get_property)
                .put(update_property)
                .delete(delete_property),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_request() -> CreatePropertyRequest {
        CreatePropertyRequest {
            title: "Lakeside Cabin".into(),
            description: String::new(),
            price_per_night_cents: 12_500,
            location: "Lakeville".into(),
            category: "cabin".into(),
            bedrooms: 1,
            bathrooms: 1,
            max_guests: 2,
        }
    }

    #[test]
    fn create_validation() {
        assert!(validate_create(&valid_request()).is_ok());

        let mut req = valid_request();
        req.title = "   ".into();
        assert_eq!(
            validate_create(&req).unwrap_err(),
            ValidationError::Empty { field: "title" }
        );

        let mut req = valid_request();
        req.price_per_night_cents = -1;
        assert!(matches!(
            validate_create(&req).unwrap_err(),
            ValidationError::OutOfRange { field: "price_per_night_cents", .. }
        ));

        let mut req = valid_request();
        req.max_guests = 0;
        assert!(validate_create(&req).is_err());
    }
}
