use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("A recurring series already exists for task {0}")]
    DuplicateSeries(String),

    #[error("Invalid recurrence rule: {0}")]
    InvalidRule(String),

    #[error("An unknown error has occurred.")]
    Unknown,
}
