use thiserror::Error;

/// Infrastructure errors that can occur during application startup.
///
/// Display messages are safe for logs. Debug output includes the #[source]
/// chain, which may contain the connection string; log with `%e`, not `?e`.
#[derive(Error, Debug)]
pub enum InfraError {
    #[error("Database connection failed. Check DATABASE_URL and ensure the database is running.")]
    DatabaseConnection(#[source] sqlx::Error),

    #[error("Database migration failed")]
    Migration(#[source] sqlx::migrate::MigrateError),

    #[error("TCP bind failed")]
    TcpBind(#[source] std::io::Error),

    #[error("Server error")]
    Server(#[source] std::io::Error),
}
