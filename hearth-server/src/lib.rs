//! hearth-server: REST API for the hearth rental marketplace
//!
//! Thin CRUD over Postgres plus an external image store. The one
//! operation with a real invariant is the thumbnail-exclusivity
//! transaction in [`db::repos::ImageRepo::set_thumbnail`].

pub mod auth;
pub mod db;
pub mod http;
pub mod models;
pub mod store;
pub mod upload;

use std::sync::Arc;

use hearth_core::AppConfig;

use store::HttpImageStore;

pub use http::{run_server, AppState, ServerConfig};

/// Wire everything up from config and serve until shutdown.
pub async fn serve(config: AppConfig, cors_permissive: bool) -> anyhow::Result<()> {
    let pool =
        db::pool::create_pool_with_options(&config.database_url, config.max_db_connections).await?;
    db::migrations::run(&pool).await?;

    let store = Arc::new(HttpImageStore::new(
        config.image_store_url.clone(),
        config.image_store_api_key.clone(),
    ));

    let server_config = ServerConfig {
        bind_addr: config.bind_addr,
        cors_permissive,
    };

    http::run_server(pool, store, server_config).await?;
    Ok(())
}
