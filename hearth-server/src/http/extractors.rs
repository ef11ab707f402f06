//! Custom Axum extractors.
//!
//! Authentication is an explicit per-request lookup: the bearer token
//! maps to a session row, and the resulting identity travels with the
//! request. No module-level auth state exists anywhere.

use std::sync::Arc;

use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;

use crate::db::repos::{SessionUser, UserRepo};

use super::error::ApiError;
use super::server::AppState;

/// The authenticated caller, resolved from `Authorization: Bearer`.
pub struct CurrentUser {
    pub user: SessionUser,
    /// The raw token, kept so logout can clear the session row.
    pub token: String,
}

impl FromRequestParts<Arc<AppState>> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(ApiError::Unauthorized)?
            .to_string();

        let user = UserRepo::new(&state.pool)
            .session_user(&token)
            .await?
            .ok_or(ApiError::Unauthorized)?;

        Ok(Self { user, token })
    }
}

/// Like [`CurrentUser`], but rejects non-admin callers with 403.
pub struct AdminUser(pub SessionUser);

impl FromRequestParts<Arc<AppState>> for AdminUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let current = CurrentUser::from_request_parts(parts, state).await?;
        if !current.user.is_admin {
            return Err(ApiError::Forbidden {
                reason: "admin access required",
            });
        }
        Ok(Self(current.user))
    }
}
