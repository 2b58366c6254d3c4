use axum::{
    extract::rejection::{FormRejection, PathRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use super::pages;
use crate::services::{AuthError, MovieError};

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    BadRequest(String),

    DatabaseError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::BadRequest(msg) => write!(f, "Bad request: {msg}"),
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::InternalError(msg) => write!(f, "Internal error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::NotFound(msg) => {
                tracing::debug!("Not found: {}", msg);
                StatusCode::NOT_FOUND
            }
            Self::BadRequest(msg) => {
                tracing::debug!("Bad request: {}", msg);
                StatusCode::BAD_REQUEST
            }
            Self::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Html(pages::error_page(status))).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        Self::InternalError(err.to_string())
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::InternalError(format!("Session error: {err}"))
    }
}

impl From<FormRejection> for ApiError {
    fn from(rejection: FormRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::NotFound(rejection.body_text())
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(msg) => Self::DatabaseError(msg),
            AuthError::UserNotFound => Self::not_found("User", "current"),
            other => Self::InternalError(other.to_string()),
        }
    }
}

impl From<MovieError> for ApiError {
    fn from(err: MovieError) -> Self {
        match err {
            MovieError::NotFound(id) => Self::not_found("Movie", id),
            MovieError::Database(msg) => Self::DatabaseError(msg),
            MovieError::InvalidData => Self::BadRequest("Invalid movie data".to_string()),
        }
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        Self::NotFound(format!("{resource} {id} not found"))
    }
}
