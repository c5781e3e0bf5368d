// Defines a custom error type and a result type alias using the thiserror crate.
use thiserror::Error;

// Make the response module public
pub mod response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Authentication error: {0}")]
    Auth(String),

    // The #[from] attribute automatically converts a redis::RedisError into an AppError::Redis using the From trait.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("File error: {0}")]
    File(#[from] std::io::Error),

    #[error("{0} not found")]
    NotFound(String),

    #[error("Access denied")]
    Forbidden,
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
