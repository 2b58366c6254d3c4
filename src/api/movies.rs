use axum::{
    Form,
    extract::{
        Path, State,
        rejection::{FormRejection, PathRejection},
    },
    response::{Html, Response},
};
use std::sync::Arc;
use tower_sessions::Session;

use super::auth::{page_context, session_user};
use super::{ApiError, AppState, flash, pages};
use crate::constants::flash as messages;
use crate::models::movie::MovieInput;
use crate::services::MovieError;

/// GET /
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let ctx = page_context(&state, &session).await?;
    let movies = state.movies().list().await?;

    Ok(Html(pages::index(&ctx, &movies)))
}

/// POST /
/// Anonymous submissions are bounced back to the list without a notice.
pub async fn create(
    State(state): State<Arc<AppState>>,
    session: Session,
    form: Result<Form<MovieInput>, FormRejection>,
) -> Result<Response, ApiError> {
    if session_user(&state, &session).await?.is_none() {
        return Ok(flash::found("/"));
    }

    let Form(input) = form?;

    match state.movies().create(&input).await {
        Ok(_) => flash::redirect_with(&session, messages::ITEM_CREATED, "/").await,
        Err(MovieError::InvalidData) => {
            flash::redirect_with(&session, messages::INVALID_INPUT, "/").await
        }
        Err(e) => Err(e.into()),
    }
}

/// GET /movie/edit/{id}
pub async fn edit_page(
    State(state): State<Arc<AppState>>,
    session: Session,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Html<String>, ApiError> {
    let Path(id) = path?;
    let movie = state.movies().get(id).await?;
    let ctx = page_context(&state, &session).await?;

    Ok(Html(pages::edit(&ctx, &movie)))
}

/// POST /movie/edit/{id}
pub async fn update(
    State(state): State<Arc<AppState>>,
    session: Session,
    path: Result<Path<i32>, PathRejection>,
    form: Result<Form<MovieInput>, FormRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = path?;
    let Form(input) = form?;

    match state.movies().update(id, &input).await {
        Ok(_) => flash::redirect_with(&session, messages::ITEM_UPDATED, "/").await,
        Err(MovieError::InvalidData) => {
            flash::redirect_with(&session, messages::INVALID_INPUT, format!("/movie/edit/{id}"))
                .await
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /movie/delete/{id}
pub async fn delete(
    State(state): State<Arc<AppState>>,
    session: Session,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Response, ApiError> {
    let Path(id) = path?;
    state.movies().delete(id).await?;

    flash::redirect_with(&session, messages::ITEM_DELETED, "/").await
}
