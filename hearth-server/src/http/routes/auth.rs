//! Account endpoints: register, login, logout.
//!
//! Login inserts a session row and hands the token back; logout deletes
//! the row. Clients send the token as `Authorization: Bearer <token>`.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Duration;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::auth;
use crate::db::repos::UserRepo;
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::http::Envelope;
use crate::models::ValidationError;

/// Sessions live for a week; logging in again issues a fresh one.
const SESSION_TTL_DAYS: i64 = 7;

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub display_name: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// POST /api/auth/register - create an account and log it in
async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<Envelope<Value>>), ApiError> {
    if req.email.trim().is_empty() {
        return Err(ValidationError::Empty { field: "email" }.into());
    }
    if req.password.is_empty() {
        return Err(ValidationError::Empty { field: "password" }.into());
    }

    let repo = UserRepo::new(&state.pool);
    let salt = auth::generate_salt();
    let hash = auth::hash_password(&req.password, &salt);
    let user = repo
        .create(req.email.trim(), req.display_name.trim(), &hash, &salt)
        .await?;

    let token = auth::generate_token();
    repo.create_session(user.id, &token, Duration::days(SESSION_TTL_DAYS))
        .await?;

    tracing::info!(user_id = %user.id, "account registered");

    Ok((
        StatusCode::CREATED,
        Json(Envelope::ok(json!({
            "token": token,
            "user": {
                "id": user.id,
                "email": user.email,
                "display_name": user.display_name,
                "is_admin": user.is_admin,
            }
        }))),
    ))
}

/// POST /api/auth/login - verify credentials, create a session
async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Envelope<Value>>, ApiError> {
    let repo = UserRepo::new(&state.pool);

    let user = repo
        .find_by_email(req.email.trim())
        .await?
        .ok_or(ApiError::Unauthorized)?;

    if !auth::verify_password(&req.password, &user.password_salt, &user.password_hash) {
        return Err(ApiError::Unauthorized);
    }

    let token = auth::generate_token();
    repo.create_session(user.id, &token, Duration::days(SESSION_TTL_DAYS))
        .await?;

    Ok(Json(Envelope::ok(json!({
        "token": token,
        "user": {
            "id": user.id,
            "email": user.email,
            "display_name": user.display_name,
            "is_admin": user.is_admin,
        }
    }))))
}

/// POST /api/auth/logout - delete the caller's session row
async fn logout(
    State(state): State<Arc<AppState>>,
    current: CurrentUser,
) -> Result<Json<Envelope<Value>>, ApiError> {
    UserRepo::new(&state.pool)
        .delete_session(&current.token)
        .await?;

    Ok(Json(Envelope::ok(json!({ "logged_out": true }))))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
}
