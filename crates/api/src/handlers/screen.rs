//! Handlers for the `/screens` resource.
//!
//! A screen must belong to a live theatre: creation, replacement, and any
//! update that supplies `theatre_id` verify the reference first.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::types::DbId;
use marquee_core::{conditional, etag};
use marquee_db::models::screen::{CreateScreen, Screen, ScreenFilter, UpdateScreen};
use marquee_db::repositories::{ScreenRepo, TheatreRepo};

use crate::error::{AppError, AppResult};
use crate::preconditions::{self, etag_header};
use crate::state::AppState;

/// POST /screens
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateScreen>,
) -> AppResult<impl IntoResponse> {
    ensure_theatre_exists(&state, input.theatre_id).await?;
    ensure_grid_is_positive(input.num_rows, input.num_cols)?;

    let screen = ScreenRepo::create(&state.pool, &input).await?;
    let tag = etag::compute(&screen)?;
    tracing::info!(screen_id = screen.id, theatre_id = screen.theatre_id, "Created screen");
    Ok((StatusCode::CREATED, etag_header(tag), Json(screen)))
}

/// GET /screens
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ScreenFilter>,
) -> AppResult<Json<Vec<Screen>>> {
    let screens = ScreenRepo::list(&state.pool, &filter).await?;
    Ok(Json(screens))
}

/// GET /screens/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let screen = find_screen(&state, id).await?;
    let tag = etag::compute(&screen)?;

    if conditional::is_not_modified(&tag, preconditions::if_none_match(&headers)) {
        return Ok((StatusCode::NOT_MODIFIED, etag_header(tag)).into_response());
    }
    Ok((etag_header(tag), Json(screen)).into_response())
}

/// PATCH /screens/{id} -- requires `If-Match`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<UpdateScreen>,
) -> AppResult<impl IntoResponse> {
    let existing = find_screen(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::require_if_match(&current, preconditions::if_match(&headers))?;

    if let Some(theatre_id) = input.theatre_id {
        ensure_theatre_exists(&state, theatre_id).await?;
    }
    ensure_grid_is_positive(
        input.num_rows.unwrap_or(existing.num_rows),
        input.num_cols.unwrap_or(existing.num_cols),
    )?;

    match ScreenRepo::update(&state.pool, id, existing.updated_at, &input).await? {
        Some(screen) => {
            let tag = etag::compute(&screen)?;
            tracing::info!(screen_id = screen.id, "Updated screen");
            Ok((etag_header(tag), Json(screen)))
        }
        None => Err(lost_race(&state, id).await),
    }
}

/// PUT /screens/{id} -- requires `If-Match`; create-shaped payload.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<CreateScreen>,
) -> AppResult<impl IntoResponse> {
    let existing = find_screen(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::require_if_match(&current, preconditions::if_match(&headers))?;

    ensure_theatre_exists(&state, input.theatre_id).await?;
    ensure_grid_is_positive(input.num_rows, input.num_cols)?;

    match ScreenRepo::replace(&state.pool, id, existing.updated_at, &input).await? {
        Some(screen) => {
            let tag = etag::compute(&screen)?;
            tracing::info!(screen_id = screen.id, "Replaced screen");
            Ok((etag_header(tag), Json(screen)))
        }
        None => Err(lost_race(&state, id).await),
    }
}

/// DELETE /screens/{id} -- `If-Match` is optional.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let existing = find_screen(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::check_if_match(&current, preconditions::if_match(&headers))?;

    if ScreenRepo::soft_delete(&state.pool, id, existing.updated_at).await? {
        tracing::info!(screen_id = id, "Soft-deleted screen");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(lost_race(&state, id).await)
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn find_screen(state: &AppState, id: DbId) -> AppResult<Screen> {
    ScreenRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screen",
            id,
        }))
}

/// Reject when the referenced theatre is missing or soft-deleted.
async fn ensure_theatre_exists(state: &AppState, theatre_id: DbId) -> AppResult<()> {
    if TheatreRepo::find_by_id(&state.pool, theatre_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Theatre",
            id: theatre_id,
        }));
    }
    Ok(())
}

/// A seating grid needs at least one row and one column.
fn ensure_grid_is_positive(num_rows: i32, num_cols: i32) -> AppResult<()> {
    if num_rows < 1 || num_cols < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "num_rows and num_cols must be at least 1".to_string(),
        )));
    }
    Ok(())
}

/// Classify a compare-and-swap miss after a passing precondition check:
/// the row changed under us (412) or is gone (404).
async fn lost_race(state: &AppState, id: DbId) -> AppError {
    match ScreenRepo::find_by_id(&state.pool, id).await {
        Ok(Some(_)) => AppError::Core(CoreError::PreconditionFailed),
        Ok(None) => AppError::Core(CoreError::NotFound {
            entity: "Screen",
            id,
        }),
        Err(e) => AppError::Database(e),
    }
}
