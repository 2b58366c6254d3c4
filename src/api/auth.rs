use axum::{
    Extension, Form,
    extract::{Request, State, rejection::FormRejection},
    middleware::Next,
    response::{Html, Response},
};
use serde::Deserialize;
use std::sync::Arc;
use tower_sessions::Session;

use super::{ApiError, AppState, flash, pages};
use crate::constants::{flash as messages, session::USER_ID_KEY};
use crate::models::user::User;
use crate::services::AuthError;

// ============================================================================
// Request Types
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SettingsForm {
    #[serde(default)]
    pub name: String,
}

/// The logged-in user, attached to the request by [`require_login`]
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

// ============================================================================
// Middleware
// ============================================================================

/// Lets the request through only when the session resolves to a stored user.
/// Anonymous callers are sent to the login page with a notice.
pub async fn require_login(
    State(state): State<Arc<AppState>>,
    session: Session,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if let Some(user) = session_user(&state, &session).await? {
        tracing::Span::current().record("user_id", user.id);
        request.extensions_mut().insert(CurrentUser(user));
        return Ok(next.run(request).await);
    }

    flash::redirect_with(&session, messages::LOGIN_REQUIRED, "/login").await
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /login
pub async fn login_page(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let ctx = page_context(&state, &session).await?;
    Ok(Html(pages::login(&ctx)))
}

/// POST /login
pub async fn login(
    State(state): State<Arc<AppState>>,
    session: Session,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(payload) = form?;

    match state.auth().login(&payload.username, &payload.password).await {
        Ok(user) => {
            session.cycle_id().await?;
            session.insert(USER_ID_KEY, user.id).await?;
            tracing::info!(user_id = user.id, "Login succeeded");
            flash::redirect_with(&session, messages::LOGIN_SUCCESS, "/").await
        }
        Err(AuthError::Validation(_)) => {
            flash::redirect_with(&session, messages::INVALID_INPUT, "/login").await
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!("Login failed for username: {}", payload.username);
            flash::redirect_with(&session, messages::INVALID_CREDENTIALS, "/login").await
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /logout
pub async fn logout(
    session: Session,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Response, ApiError> {
    session.remove::<i32>(USER_ID_KEY).await?;
    session.cycle_id().await?;
    tracing::info!(user_id = user.id, "Logged out");
    flash::redirect_with(&session, messages::GOODBYE, "/").await
}

/// GET /settings
pub async fn settings_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Html<String>, ApiError> {
    let ctx = page_context(&state, &session).await?;
    Ok(Html(pages::settings(&ctx, &user.name)))
}

/// POST /settings
pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    session: Session,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    form: Result<Form<SettingsForm>, FormRejection>,
) -> Result<Response, ApiError> {
    let Form(payload) = form?;

    match state.auth().update_name(user.id, &payload.name).await {
        Ok(_) => flash::redirect_with(&session, messages::SETTINGS_UPDATED, "/").await,
        Err(AuthError::Validation(_)) => {
            flash::redirect_with(&session, messages::INVALID_INPUT, "/settings").await
        }
        Err(e) => Err(e.into()),
    }
}

// ============================================================================
// Helpers
// ============================================================================

/// Resolve the session's user id to a stored user.
/// A session pointing at a deleted row counts as anonymous.
pub async fn session_user(state: &AppState, session: &Session) -> Result<Option<User>, ApiError> {
    let Some(user_id) = session.get::<i32>(USER_ID_KEY).await? else {
        return Ok(None);
    };

    Ok(state.auth().current_user(user_id).await?)
}

/// Gather what every page needs and drain pending flash messages
pub async fn page_context(
    state: &AppState,
    session: &Session,
) -> Result<pages::PageContext, ApiError> {
    let authenticated = session_user(state, session).await?.is_some();
    let owner_name = state.auth().owner().await?.map(|owner| owner.name);
    let flashes = flash::take(session).await?;

    Ok(pages::PageContext {
        owner_name,
        authenticated,
        flashes,
    })
}
