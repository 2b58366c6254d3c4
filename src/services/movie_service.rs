//! Domain service for watchlist entries.

use thiserror::Error;

use crate::models::movie::{Movie, MovieInput};

/// Domain errors for movie operations.
#[derive(Debug, Error)]
pub enum MovieError {
    #[error("Movie not found: {0}")]
    NotFound(i32),

    #[error("Invalid movie data")]
    InvalidData,

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for MovieError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for MovieError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Domain service trait for movie CRUD.
#[async_trait::async_trait]
pub trait MovieService: Send + Sync {
    /// Lists every movie in insertion order.
    async fn list(&self) -> Result<Vec<Movie>, MovieError>;

    /// # Errors
    ///
    /// Returns [`MovieError::NotFound`] if the movie does not exist.
    async fn get(&self, id: i32) -> Result<Movie, MovieError>;

    /// Validates and appends a movie.
    ///
    /// # Errors
    ///
    /// Returns [`MovieError::InvalidData`] if the title is empty or longer than
    /// 60 characters, or the year is not exactly 4 characters.
    async fn create(&self, input: &MovieInput) -> Result<Movie, MovieError>;

    /// Validates and overwrites title and year. The row is untouched on error.
    async fn update(&self, id: i32, input: &MovieInput) -> Result<Movie, MovieError>;

    async fn delete(&self, id: i32) -> Result<(), MovieError>;
}
