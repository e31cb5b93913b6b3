use sqlx::PgPool;

use crate::app_error::AppError;

pub mod event_type;
pub mod quote;
pub mod user;

/// Single Postgres adapter implementing every repository trait.
#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::NotFound,
            sqlx::Error::Database(db_err) => {
                if db_err.is_unique_violation() {
                    AppError::InvalidInput("A record with this value already exists".into())
                } else if db_err.is_foreign_key_violation() {
                    AppError::InvalidInput("Referenced record not found".into())
                } else if db_err.is_check_violation() {
                    AppError::InvalidInput("Value out of range".into())
                } else {
                    // Log the actual error, never expose it
                    tracing::error!(error = ?err, "Database error");
                    AppError::Database("Database operation failed".into())
                }
            }
            _ => {
                tracing::error!(error = ?err, "Database error");
                AppError::Database("Database operation failed".into())
            }
        }
    }
}
