//! Groove Catalog Storage
//!
//! Two interchangeable implementations of [`groove_core::CatalogStorage`]:
//!
//! - [`SqliteCatalog`]: persistent `SQLite` database accessed through sqlx
//! - [`MemoryCatalog`]: map-based store for demos and tests
//!
//! # Architecture
//!
//! - **Vertical Slicing**: Each entity owns its own queries (`albums`, `tracks`, ...)
//! - **One Contract**: Filtering, ordering and cascades behave identically in both backends
//! - **Embedded Migrations**: The schema ships inside the binary
//!
//! # Example
//!
//! ```rust,no_run
//! use groove_storage::{create_pool, run_migrations, SqliteCatalog};
//! use groove_core::CatalogStorage;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://groove.db").await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = SqliteCatalog::new(pool);
//! let genres = catalog.get_genres().await?;
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod memory;
mod seed;

// Vertical slices
pub mod albums;
pub mod artists;
pub mod genres;
pub mod related_albums;
pub mod tracks;
pub mod users;

pub use context::SqliteCatalog;
pub use error::StorageError;
pub use memory::MemoryCatalog;
pub use seed::seed_demo_catalog;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), StorageError> {
    MIGRATOR.run(pool).await?;
    Ok(())
}

/// Create a new `SQLite` pool
///
/// # Arguments
///
/// * `database_url` - `SQLite` connection string (e.g., `<sqlite://groove.db>`)
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, StorageError> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    tracing::debug!("Creating SQLite pool for {}", database_url);

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

    tracing::debug!("SQLite pool ready");

    Ok(pool)
}
