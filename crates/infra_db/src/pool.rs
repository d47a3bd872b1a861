//! PostgreSQL connection pooling
//!
//! Receipt traffic is short bursty writes and paginated reads, so the pool
//! stays small by default and recycles connections aggressively.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Pool sizing and timeout settings
///
/// Construct with a struct literal over [`Default`]:
///
/// ```rust
/// use infra_db::PoolSettings;
///
/// let settings = PoolSettings {
///     max_connections: 20,
///     ..PoolSettings::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct PoolSettings {
    pub max_connections: u32,
    pub min_connections: u32,
    /// How long to wait for a free connection before giving up
    pub acquire_timeout: Duration,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            min_connections: 2,
            acquire_timeout: Duration::from_secs(30),
            max_lifetime: Duration::from_secs(30 * 60),
            idle_timeout: Duration::from_secs(10 * 60),
        }
    }
}

impl PoolSettings {
    /// Opens a pool against `url` with these settings
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::ConnectionFailed` if the initial connection
    /// cannot be established.
    pub async fn connect(&self, url: &str) -> Result<DatabasePool, DatabaseError> {
        info!(
            max_connections = self.max_connections,
            min_connections = self.min_connections,
            "opening database pool"
        );

        let pool = PgPoolOptions::new()
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .acquire_timeout(self.acquire_timeout)
            .max_lifetime(self.max_lifetime)
            .idle_timeout(self.idle_timeout)
            .connect(url)
            .await
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        info!("database pool ready");
        Ok(pool)
    }
}

/// Opens a pool with default settings
pub async fn connect(url: &str) -> Result<DatabasePool, DatabaseError> {
    PoolSettings::default().connect(url).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_compose_with_defaults() {
        let settings = PoolSettings {
            max_connections: 50,
            acquire_timeout: Duration::from_secs(60),
            ..PoolSettings::default()
        };

        assert_eq!(settings.max_connections, 50);
        assert_eq!(settings.min_connections, 2);
        assert_eq!(settings.acquire_timeout, Duration::from_secs(60));
    }
}
