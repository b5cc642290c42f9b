//! Persistence layer for the guest check-in service.
//!
//! - [`models`] -- row structs, create DTOs and list filters.
//! - [`repositories`] -- zero-sized sqlx repositories over `&PgPool`.
//! - [`store`] -- the [`CheckinStore`] data-access trait and its PostgreSQL
//!   implementation.
//! - [`memory`] -- an in-process [`CheckinStore`] for router tests and demos.

use sqlx::postgres::PgPoolOptions;

pub mod memory;
pub mod models;
pub mod repositories;
pub mod store;

pub use memory::MemoryStore;
pub use store::{CheckinStore, PgStore, StoreError, StoreResult};

pub type DbPool = sqlx::PgPool;

/// Create a connection pool from a database URL.
pub async fn create_pool(database_url: &str, max_connections: u32) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(max_connections)
        .connect(database_url)
        .await
}

/// Round-trip a trivial query to confirm the database is reachable.
pub async fn health_check(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}

/// Apply the embedded migrations from `crates/db/migrations`.
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}
