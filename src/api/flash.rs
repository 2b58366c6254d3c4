//! One-shot notices carried in the session until the next rendered page.

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use super::ApiError;
use crate::constants::session::FLASH_KEY;

pub async fn push(session: &Session, message: &str) -> Result<(), ApiError> {
    let mut messages: Vec<String> = session.get(FLASH_KEY).await?.unwrap_or_default();
    messages.push(message.to_string());
    session.insert(FLASH_KEY, messages).await?;
    Ok(())
}

/// Drain every pending message
pub async fn take(session: &Session) -> Result<Vec<String>, ApiError> {
    Ok(session
        .remove::<Vec<String>>(FLASH_KEY)
        .await?
        .unwrap_or_default())
}

/// 302 Found to `location`
pub fn found(location: impl Into<String>) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.into())]).into_response()
}

/// Flash `message`, then redirect to `location`
pub async fn redirect_with(
    session: &Session,
    message: &str,
    location: impl Into<String>,
) -> Result<Response, ApiError> {
    push(session, message).await?;
    Ok(found(location))
}
