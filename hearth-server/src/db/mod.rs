//! Database access: pool management, migrations, repositories

pub mod migrations;
pub mod pool;
pub mod repos;

#[cfg(test)]
pub(crate) mod testutil;

pub use pool::create_pool;
pub use repos::DbError;
