//! User and session repository.
//!
//! Sessions are rows, not ambient state: login inserts one, logout
//! deletes it, and every authenticated request loads it fresh.

use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use super::DbError;

/// User record from database. The hash and salt never leave this layer.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub password_hash: String,
    pub password_salt: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
}

/// Session record
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub token: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// The authenticated identity attached to a request.
#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub user_id: Uuid,
    pub email: String,
    pub display_name: String,
    pub is_admin: bool,
}

/// User repository
pub struct UserRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> UserRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        email: &str,
        display_name: &str,
        password_hash: &str,
        password_salt: &str,
    ) -> Result<User, DbError> {
        let result = sqlx::query_as(
            r#"
            INSERT INTO users (email, display_name, password_hash, password_salt)
            VALUES ($1, $2, $3, $4)
            RETURNING id, email, display_name, password_hash, password_salt, is_admin, created_at
            "#,
        )
        .bind(email)
        .bind(display_name)
        .bind(password_hash)
        .bind(password_salt)
        .fetch_one(self.pool)
        .await;

        match result {
            Ok(user) => Ok(user),
            Err(e) => {
                let err = DbError::from(e);
                if err.is_unique_violation() {
                    Err(DbError::Conflict {
                        reason: "email already registered".to_string(),
                    })
                } else {
                    Err(err)
                }
            }
        }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<User>, DbError> {
        let user = sqlx::query_as(
            r#"
            SELECT id, email, display_name, password_hash, password_salt, is_admin, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.pool)
        .await?;

        Ok(user)
    }

    /// Insert a session row valid for `ttl`.
    pub async fn create_session(
        &self,
        user_id: Uuid,
        token: &str,
        ttl: Duration,
    ) -> Result<Session, DbError> {
        let session = sqlx::query_as(
            r#"
            INSERT INTO sessions (token, user_id, expires_at)
            VALUES ($1, $2, $3)
            RETURNING token, user_id, created_at, expires_at
            "#,
        )
        .bind(token)
        .bind(user_id)
        .bind(Utc::now() + ttl)
        .fetch_one(self.pool)
        .await?;

        Ok(session)
    }

    /// Clear-on-logout: remove the session row.
    pub async fn delete_session(&self, token: &str) -> Result<bool, DbError> {
        let result = sqlx::query("DELETE FROM sessions WHERE token = $1")
            .bind(token)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Resolve a bearer token to its user, ignoring expired sessions.
    pub async fn session_user(&self, token: &str) -> Result<Option<SessionUser>, DbError> {
        let row: Option<(Uuid, String, String, bool)> = sqlx::query_as(
            r#"
            SELECT u.id, u.email, u.display_name, u.is_admin
            FROM sessions s
            JOIN users u ON u.id = s.user_id
            WHERE s.token = $1 AND s.expires_at > NOW()
            "#,
        )
        .bind(token)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(|(user_id, email, display_name, is_admin)| SessionUser {
            user_id,
            email,
            display_name,
            is_admin,
        }))
    }
}
