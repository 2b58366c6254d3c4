//! Domain service for authentication and the owner account.
//!
//! Handles credential checks, session identity resolution and display name changes.

use thiserror::Error;

use crate::models::user::User;

/// Errors specific to authentication operations.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<sea_orm::DbErr> for AuthError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for AuthError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// Domain service trait for authentication.
#[async_trait::async_trait]
pub trait AuthService: Send + Sync {
    /// Verifies credentials against the single stored user.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] when either field is blank and
    /// [`AuthError::InvalidCredentials`] when they do not match.
    async fn login(&self, username: &str, password: &str) -> Result<User, AuthError>;

    /// Resolves a session's user id. `None` if the row no longer exists.
    async fn current_user(&self, id: i32) -> Result<Option<User>, AuthError>;

    /// The watchlist owner, if one has been created.
    async fn owner(&self) -> Result<Option<User>, AuthError>;

    /// Changes the display name.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Validation`] if the name is empty or longer than 20 characters.
    async fn update_name(&self, id: i32, name: &str) -> Result<User, AuthError>;
}
