//! Database Infrastructure - PostgreSQL persistence for the receipt domain
//!
//! This crate owns everything that touches the database: pool creation,
//! schema migrations, error mapping, and the repository implementing the
//! domain's `ReceiptStore` port.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{connect, run_migrations, PgReceiptStore};
//!
//! let pool = connect(&database_url).await?;
//! run_migrations(&pool).await?;
//! let store = PgReceiptStore::new(pool);
//! ```

pub mod error;
pub mod pool;
pub mod repositories;

pub use error::DatabaseError;
pub use pool::{connect, DatabasePool, PoolSettings};
pub use repositories::PgReceiptStore;

use tracing::info;

/// Applies all pending schema migrations
///
/// # Errors
///
/// Returns `DatabaseError::MigrationFailed` if any migration cannot be
/// applied.
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("running database migrations");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    info!("database migrations complete");
    Ok(())
}
