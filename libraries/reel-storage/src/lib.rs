//! Reel Vault Storage
//!
//! `SQLite` catalog backend for the Reel Vault media library.
//!
//! This crate persists video metadata and playlist membership. Physical file
//! bytes are owned by `reel-content`; this layer stores only identities
//! (store-relative filenames, content hashes, URLs).
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each feature owns its own queries (`videos`,
//!   `playlists`)
//! - **Scoped Context**: [`SqliteCatalog`] binds a pool to one owner scope
//!   and implements [`reel_core::CatalogStore`]
//! - **Single Logical Model**: business rules live above the trait; this
//!   crate only enforces the schema's identity and cascade invariants
//!
//! # Example
//!
//! ```rust,no_run
//! use reel_storage::{create_pool, run_migrations, SqliteCatalog};
//! use reel_core::{CatalogStore, OwnerScope};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool("sqlite://reel.db").await?;
//! run_migrations(&pool).await?;
//!
//! let catalog = SqliteCatalog::new(pool, OwnerScope::new("local-user"));
//! let videos = catalog.list_videos(&Default::default()).await?;
//! # Ok(())
//! # }
//! ```

mod context;

// Vertical slices
pub mod playlists;
pub mod videos;

pub use context::SqliteCatalog;

use sqlx::migrate::Migrator;
use sqlx::sqlite::SqlitePool;

// Embed migrations into binary
static MIGRATOR: Migrator = sqlx::migrate!("./migrations");

/// Run database migrations
///
/// This should be called once when the application starts to ensure
/// the database schema is up to date.
///
/// # Errors
///
/// Returns an error if migrations fail to run
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    MIGRATOR.run(pool).await
}

/// Create a new `SQLite` pool
///
/// WAL journal mode for concurrent readers, foreign keys on so membership
/// cascades are enforced by the engine, and a generous busy timeout for
/// writer lock waits.
///
/// # Errors
///
/// Returns an error if the connection fails
pub async fn create_pool(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
    use std::str::FromStr;

    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .foreign_keys(true)
        .busy_timeout(std::time::Duration::from_secs(30));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Whether a sqlx error is a unique-constraint violation
///
/// Used by the slices to translate engine-level identity enforcement into
/// the `Conflict` taxonomy instead of leaking database detail.
pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => db.kind() == sqlx::error::ErrorKind::UniqueViolation,
        _ => false,
    }
}
