//! Shared fixtures for database-backed tests.
//!
//! Every helper creates fresh rows with random identifiers, so tests can
//! share one database without trampling each other.

use sqlx::PgPool;
use uuid::Uuid;

/// Connect to the test database named by DATABASE_URL and make sure the
/// schema exists.
pub async fn pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required for db tests");
    let pool = super::pool::create_pool(&url).await.expect("pool creation failed");
    super::migrations::run(&pool).await.expect("migrations failed");
    pool
}

/// Insert a user and return its id.
pub async fn user(pool: &PgPool) -> Uuid {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (email, display_name, password_hash, password_salt)
        VALUES ($1, 'Test User', 'x', 'x')
        RETURNING id
        "#,
    )
    .bind(format!("user-{}@test.invalid", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .expect("insert user");
    id
}

/// Insert a property owned by a fresh user and return its id.
pub async fn property(pool: &PgPool) -> Uuid {
    let owner = user(pool).await;
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO properties
            (owner_id, title, description, price_per_night_cents, location, category, max_guests)
        VALUES ($1, 'Test Cabin', 'A cabin for tests', 12500, 'Testville', 'cabin', 4)
        RETURNING id
        "#,
    )
    .bind(owner)
    .fetch_one(pool)
    .await
    .expect("insert property");
    id
}

/// Insert a non-thumbnail image for the property and return its id.
pub async fn image(pool: &PgPool, property_id: Uuid) -> Uuid {
    let (id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO images (property_id, url, public_id)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(property_id)
    .bind(format!("https://img.test/{}", Uuid::new_v4()))
    .bind(format!("pub-{}", Uuid::new_v4()))
    .fetch_one(pool)
    .await
    .expect("insert image");
    id
}
