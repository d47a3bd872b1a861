//! Database error types
//!
//! Maps SQLx and PostgreSQL failures onto typed variants, and bridges them
//! into the domain's store-port error.

use thiserror::Error;

use domain_receipt::StoreError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The initial connection or pool creation failed
    #[error("failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A statement failed for a reason with no dedicated variant
    #[error("query failed: {0}")]
    QueryFailed(String),

    /// No row matched the requested identity
    #[error("{0}")]
    NotFound(String),

    /// Unique index rejected the write (PG 23505)
    #[error("duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Referenced row does not exist (PG 23503)
    #[error("foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// CHECK constraint rejected the write (PG 23514)
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),

    /// A stored value could not be mapped back into a domain type
    #[error("serialization error: {0}")]
    SerializationError(String),

    /// No free connection within the acquire timeout
    #[error("connection pool exhausted")]
    PoolExhausted,

    /// A schema migration could not be applied
    #[error("migration failed: {0}")]
    MigrationFailed(String),
}

impl DatabaseError {
    /// Not-found error for an entity type and identifier
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{entity} with id {id} not found"))
    }

    /// True if no row matched the request
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// True for any of the integrity-constraint variants
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }
}

/// Maps SQLx errors to specific variants using PostgreSQL error codes
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Database(db_err) => {
                if let Some(code) = db_err.code() {
                    match code.as_ref() {
                        "23505" => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                        "23503" => DatabaseError::ForeignKeyViolation(db_err.message().to_string()),
                        "23514" => DatabaseError::ConstraintViolation(db_err.message().to_string()),
                        _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                    }
                } else {
                    DatabaseError::QueryFailed(db_err.message().to_string())
                }
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}

/// Bridges infrastructure failures into the domain's store port
///
/// Not-found keeps its identity so the service can surface a missing
/// resource; everything else propagates as a generic backend failure.
impl From<DatabaseError> for StoreError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => StoreError::NotFound(message),
            other => StoreError::Backend(other.to_string()),
        }
    }
}
