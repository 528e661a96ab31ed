use crate::core::config::DatabaseConfig;
use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;

/// PostgreSQL error code for unique constraint violations
pub const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL error code for foreign key violations
pub const FOREIGN_KEY_VIOLATION: &str = "23503";

/// PostgreSQL error code for references to a column that does not exist
pub const UNDEFINED_COLUMN: &str = "42703";

pub async fn create_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
        .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
        .max_lifetime(Duration::from_secs(config.max_lifetime_secs))
        .connect_with(config.connect_options())
        .await
}

/// Returns true when the error is a database error carrying the given SQLSTATE code
pub fn has_error_code(error: &sqlx::Error, code: &str) -> bool {
    match error {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some(code),
        _ => false,
    }
}

pub fn is_unique_violation(error: &sqlx::Error) -> bool {
    has_error_code(error, UNIQUE_VIOLATION)
}

pub fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    has_error_code(error, FOREIGN_KEY_VIOLATION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_have_no_code() {
        assert!(!is_unique_violation(&sqlx::Error::RowNotFound));
        assert!(!is_foreign_key_violation(&sqlx::Error::PoolTimedOut));
        assert!(!has_error_code(&sqlx::Error::RowNotFound, UNDEFINED_COLUMN));
    }
}
