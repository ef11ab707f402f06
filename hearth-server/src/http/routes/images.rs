//! Image endpoints: upload (single and bulk), thumbnail, delete.
//!
//! Multipart bodies are decoded into a tagged, validated request before
//! anything touches the repository or the remote store; field sniffing
//! stops at this boundary.

use std::sync::Arc;

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use uuid::Uuid;

use crate::db::repos::{Image, ImageRepo};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::http::Envelope;
use crate::models::ValidationError;
use crate::upload::{self, BulkOutcome, UploadedFile};

/// A validated upload request, tagged by endpoint shape.
#[derive(Debug)]
pub enum UploadRequest {
    Single {
        property_id: Uuid,
        file: UploadedFile,
        description: Option<String>,
        make_thumbnail: bool,
    },
    Multiple {
        property_id: Uuid,
        files: Vec<UploadedFile>,
        description: Option<String>,
    },
}

fn read_err(_: axum::extract::multipart::MultipartError) -> ApiError {
    ApiError::Validation(ValidationError::InvalidFormat {
        field: "body",
        reason: "failed to read multipart field",
    })
}

/// Raw multipart fields before validation.
#[derive(Debug, Default)]
struct RawUpload {
    property_id: Option<String>,
    description: Option<String>,
    is_thumbnail: Option<String>,
    files: Vec<UploadedFile>,
}

impl RawUpload {
    /// Drain an axum multipart body. File parts may arrive as `image`
    /// (single endpoint) or repeated `images` (bulk endpoint).
    async fn collect(mut multipart: Multipart) -> Result<Self, ApiError> {
        let mut raw = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(|_| {
            ApiError::Validation(ValidationError::InvalidFormat {
                field: "body",
                reason: "malformed multipart request",
            })
        })? {
            let name = field.name().unwrap_or_default().to_string();
            match name.as_str() {
                "property_id" => raw.property_id = Some(field.text().await.map_err(read_err)?),
                "description" => raw.description = Some(field.text().await.map_err(read_err)?),
                "is_thumbnail" => raw.is_thumbnail = Some(field.text().await.map_err(read_err)?),
                "image" | "images" => {
                    let filename = field
                        .file_name()
                        .unwrap_or("unnamed")
                        .to_string();
                    let bytes = field.bytes().await.map_err(read_err)?.to_vec();
                    raw.files.push(UploadedFile { filename, bytes });
                }
                // Unknown fields are ignored, not errors
                _ => {
                    let _ = field.bytes().await;
                }
            }
        }

        Ok(raw)
    }

    fn property_id(&self) -> Result<Uuid, ValidationError> {
        let raw = self
            .property_id
            .as_deref()
            .ok_or(ValidationError::Empty {
                field: "property_id",
            })?;
        Uuid::parse_str(raw.trim()).map_err(|_| ValidationError::InvalidFormat {
            field: "property_id",
            reason: "invalid UUID format",
        })
    }

    fn into_single(mut self) -> Result<UploadRequest, ValidationError> {
        let property_id = self.property_id()?;

        let make_thumbnail = match self.is_thumbnail.as_deref() {
            None | Some("false") => false,
            Some("true") => true,
            Some(other) => {
                return Err(ValidationError::InvalidVariant {
                    field: "is_thumbnail",
                    value: other.to_string(),
                })
            }
        };

        if self.files.len() > 1 {
            return Err(ValidationError::InvalidFormat {
                field: "image",
                reason: "expected exactly one file",
            });
        }
        let file = self
            .files
            .pop()
            .filter(|f| !f.bytes.is_empty())
            .ok_or(ValidationError::Empty { field: "image" })?;

        Ok(UploadRequest::Single {
            property_id,
            file,
            description: self.description,
            make_thumbnail,
        })
    }

    fn into_multiple(self) -> Result<UploadRequest, ValidationError> {
        let property_id = self.property_id()?;

        if self.files.is_empty() {
            return Err(ValidationError::Empty { field: "images" });
        }

        Ok(UploadRequest::Multiple {
            property_id,
            files: self.files,
            description: self.description,
        })
    }
}

/// POST /api/images/upload - single image, optionally as thumbnail
async fn upload_image(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Envelope<Image>>), ApiError> {
    let raw = RawUpload::collect(multipart).await?;
    let UploadRequest::Single {
        property_id,
        file,
        description,
        make_thumbnail,
    } = raw.into_single()?
    else {
        unreachable!("into_single only builds the Single variant");
    };

    let image = upload::upload_single(
        &state.pool,
        state.store.as_ref(),
        property_id,
        file,
        description,
        make_thumbnail,
    )
    .await?;

    Ok((StatusCode::CREATED, Json(Envelope::ok(image))))
}

/// POST /api/images/upload/multiple - bulk upload, per-file outcomes
async fn upload_images(
    State(state): State<Arc<AppState>>,
    _current: CurrentUser,
    multipart: Multipart,
) -> Result<(StatusCode, Json<Envelope<BulkOutcome>>), ApiError> {
    let raw = RawUpload::collect(multipart).await?;
    let UploadRequest::Multiple {
        property_id,
        files,
        description,
    } = raw.into_multiple()?
    else {
        unreachable!("into_multiple only builds the Multiple variant");
    };

    let outcome = upload::upload_many(
        &state.pool,
        state.store.as_ref(),
        property_id,
        files,
        description,
    )
    .await;

    // Partial failure is still 201; the body carries per-file detail.
    Ok((StatusCode::CREATED, Json(Envelope::ok(outcome))))
}

/// PUT /api/images/{id}/thumbnail - make this image its property's thumbnail
async fn set_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    _current: CurrentUser,
) -> Result<Json<Envelope<Image>>, ApiError> {
    let image = ImageRepo::new(&state.pool)
        .set_thumbnail(id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "image",
            id: id.to_string(),
        })?;

    Ok(Json(Envelope::ok(image)))
}

/// DELETE /api/images/{id} - delete row, best-effort remote cleanup
async fn delete_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<Uuid>,
    _current: CurrentUser,
) -> Result<Json<Envelope<Image>>, ApiError> {
    let image = upload::delete_image(&state.pool, state.store.as_ref(), id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "image",
            id: id.to_string(),
        })?;

    Ok(Json(Envelope::ok(image)))
}

/// GET /api/properties/{id}/images
async fn list_property_images(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Envelope<Vec<Image>>>, ApiError> {
    let images = ImageRepo::new(&state.pool)
        .list_for_property(property_id)
        .await?;

    Ok(Json(Envelope::ok(images)))
}

/// GET /api/properties/{id}/thumbnail - 404 when the property has none
async fn property_thumbnail(
    State(state): State<Arc<AppState>>,
    Path(property_id): Path<Uuid>,
) -> Result<Json<Envelope<Image>>, ApiError> {
    let image = ImageRepo::new(&state.pool)
        .thumbnail_for_property(property_id)
        .await?
        .ok_or(ApiError::NotFound {
            resource: "thumbnail",
            id: property_id.to_string(),
        })?;

    Ok(Json(Envelope::ok(image)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/images/upload", post(upload_image))
        .route("/images/upload/multiple", post(upload_images))
        .route("/images/{id}/thumbnail", put(set_thumbnail))
        .route("/images/{id}", delete(delete_image))
        .route("/properties/{id}/images", get(list_property_images))
        .route("/properties/{id}/thumbnail", get(property_thumbnail))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, bytes: &[u8]) -> UploadedFile {
        UploadedFile {
            filename: name.to_string(),
            bytes: bytes.to_vec(),
        }
    }

    fn raw(property_id: Option<&str>, files: Vec<UploadedFile>) -> RawUpload {
        RawUpload {
            property_id: property_id.map(String::from),
            description: None,
            is_thumbnail: None,
            files,
        }
    }

    #[test]
    fn single_requires_property_id() {
        let err = raw(None, vec![file("a.jpg", b"x")]).into_single().unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "property_id" });
    }

    #[test]
    fn single_rejects_bad_uuid() {
        let err = raw(Some("42"), vec![file("a.jpg", b"x")])
            .into_single()
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::InvalidFormat { field: "property_id", .. }
        ));
    }

    #[test]
    fn single_requires_a_nonempty_file() {
        let id = Uuid::new_v4().to_string();
        let err = raw(Some(&id), vec![]).into_single().unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "image" });

        let err = raw(Some(&id), vec![file("a.jpg", b"")])
            .into_single()
            .unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "image" });
    }

    #[test]
    fn single_parses_thumbnail_flag() {
        let id = Uuid::new_v4().to_string();

        let mut r = raw(Some(&id), vec![file("a.jpg", b"x")]);
        r.is_thumbnail = Some("true".into());
        let UploadRequest::Single { make_thumbnail, .. } = r.into_single().unwrap() else {
            panic!("expected single variant");
        };
        assert!(make_thumbnail);

        let mut r = raw(Some(&id), vec![file("a.jpg", b"x")]);
        r.is_thumbnail = Some("yes".into());
        assert!(matches!(
            r.into_single().unwrap_err(),
            ValidationError::InvalidVariant { field: "is_thumbnail", .. }
        ));
    }

    #[test]
    fn multiple_requires_at_least_one_file() {
        let id = Uuid::new_v4().to_string();
        let err = raw(Some(&id), vec![]).into_multiple().unwrap_err();
        assert_eq!(err, ValidationError::Empty { field: "images" });

        let ok = raw(Some(&id), vec![file("a.jpg", b"x"), file("b.jpg", b"y")])
            .into_multiple()
            .unwrap();
        let UploadRequest::Multiple { files, .. } = ok else {
            panic!("expected multiple variant");
        };
        assert_eq!(files.len(), 2);
    }
}
