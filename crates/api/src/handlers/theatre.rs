//! Handlers for the `/theatres` resource.
//!
//! A theatre must belong to a live cinema: creation, replacement, and any
//! update that supplies `cinema_id` verify the reference first.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::types::DbId;
use marquee_core::{conditional, etag};
use marquee_db::models::theatre::{CreateTheatre, Theatre, TheatreFilter, UpdateTheatre};
use marquee_db::repositories::{CinemaRepo, TheatreRepo};

use crate::error::{AppError, AppResult};
use crate::preconditions::{self, etag_header};
use crate::state::AppState;

/// POST /theatres
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateTheatre>,
) -> AppResult<impl IntoResponse> {
    ensure_cinema_exists(&state, input.cinema_id).await?;

    let theatre = TheatreRepo::create(&state.pool, &input).await?;
    let tag = etag::compute(&theatre)?;
    tracing::info!(theatre_id = theatre.id, cinema_id = theatre.cinema_id, "Created theatre");
    Ok((StatusCode::CREATED, etag_header(tag), Json(theatre)))
}

/// GET /theatres
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<TheatreFilter>,
) -> AppResult<Json<Vec<Theatre>>> {
    let theatres = TheatreRepo::list(&state.pool, &filter).await?;
    Ok(Json(theatres))
}

/// GET /theatres/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let theatre = find_theatre(&state, id).await?;
    let tag = etag::compute(&theatre)?;

    if conditional::is_not_modified(&tag, preconditions::if_none_match(&headers)) {
        return Ok((StatusCode::NOT_MODIFIED, etag_header(tag)).into_response());
    }
    Ok((etag_header(tag), Json(theatre)).into_response())
}

/// PATCH /theatres/{id} -- requires `If-Match`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<UpdateTheatre>,
) -> AppResult<impl IntoResponse> {
    let existing = find_theatre(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::require_if_match(&current, preconditions::if_match(&headers))?;

    if let Some(cinema_id) = input.cinema_id {
        ensure_cinema_exists(&state, cinema_id).await?;
    }

    match TheatreRepo::update(&state.pool, id, existing.updated_at, &input).await? {
        Some(theatre) => {
            let tag = etag::compute(&theatre)?;
            tracing::info!(theatre_id = theatre.id, "Updated theatre");
            Ok((etag_header(tag), Json(theatre)))
        }
        None => Err(lost_race(&state, id).await),
    }
}

/// PUT /theatres/{id} -- requires `If-Match`; create-shaped payload.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<CreateTheatre>,
) -> AppResult<impl IntoResponse> {
    let existing = find_theatre(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::require_if_match(&current, preconditions::if_match(&headers))?;

    ensure_cinema_exists(&state, input.cinema_id).await?;

    match TheatreRepo::replace(&state.pool, id, existing.updated_at, &input).await? {
        Some(theatre) => {
            let tag = etag::compute(&theatre)?;
            tracing::info!(theatre_id = theatre.id, "Replaced theatre");
            Ok((etag_header(tag), Json(theatre)))
        }
        None => Err(lost_race(&state, id).await),
    }
}

/// DELETE /theatres/{id} -- `If-Match` is optional.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let existing = find_theatre(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::check_if_match(&current, preconditions::if_match(&headers))?;

    if TheatreRepo::soft_delete(&state.pool, id, existing.updated_at).await? {
        tracing::info!(theatre_id = id, "Soft-deleted theatre");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(lost_race(&state, id).await)
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn find_theatre(state: &AppState, id: DbId) -> AppResult<Theatre> {
    TheatreRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Theatre",
            id,
        }))
}

/// Reject when the referenced cinema is missing or soft-deleted.
async fn ensure_cinema_exists(state: &AppState, cinema_id: DbId) -> AppResult<()> {
    if CinemaRepo::find_by_id(&state.pool, cinema_id)
        .await?
        .is_none()
    {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Cinema",
            id: cinema_id,
        }));
    }
    Ok(())
}

/// Classify a compare-and-swap miss after a passing precondition check:
/// the row changed under us (412) or is gone (404).
async fn lost_race(state: &AppState, id: DbId) -> AppError {
    match TheatreRepo::find_by_id(&state.pool, id).await {
        Ok(Some(_)) => AppError::Core(CoreError::PreconditionFailed),
        Ok(None) => AppError::Core(CoreError::NotFound {
            entity: "Theatre",
            id,
        }),
        Err(e) => AppError::Database(e),
    }
}
