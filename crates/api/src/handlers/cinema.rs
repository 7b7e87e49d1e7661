//! Handlers for the `/cinemas` resource.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::types::DbId;
use marquee_core::{conditional, etag};
use marquee_db::models::cinema::{Cinema, CinemaFilter, CreateCinema, UpdateCinema};
use marquee_db::repositories::CinemaRepo;

use crate::error::{AppError, AppResult};
use crate::preconditions::{self, etag_header};
use crate::state::AppState;

/// POST /cinemas
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateCinema>,
) -> AppResult<impl IntoResponse> {
    let cinema = CinemaRepo::create(&state.pool, &input).await?;
    let tag = etag::compute(&cinema)?;
    tracing::info!(cinema_id = cinema.id, "Created cinema");
    Ok((StatusCode::CREATED, etag_header(tag), Json(cinema)))
}

/// GET /cinemas
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<CinemaFilter>,
) -> AppResult<Json<Vec<Cinema>>> {
    let cinemas = CinemaRepo::list(&state.pool, &filter).await?;
    Ok(Json(cinemas))
}

/// GET /cinemas/{id}
///
/// Answers 304 (no body, current tag attached) when the client's
/// `If-None-Match` tag is still fresh.
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let cinema = find_cinema(&state, id).await?;
    let tag = etag::compute(&cinema)?;

    if conditional::is_not_modified(&tag, preconditions::if_none_match(&headers)) {
        return Ok((StatusCode::NOT_MODIFIED, etag_header(tag)).into_response());
    }
    Ok((etag_header(tag), Json(cinema)).into_response())
}

/// PATCH /cinemas/{id} -- requires `If-Match`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<UpdateCinema>,
) -> AppResult<impl IntoResponse> {
    let existing = find_cinema(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::require_if_match(&current, preconditions::if_match(&headers))?;

    match CinemaRepo::update(&state.pool, id, existing.updated_at, &input).await? {
        Some(cinema) => {
            let tag = etag::compute(&cinema)?;
            tracing::info!(cinema_id = cinema.id, "Updated cinema");
            Ok((etag_header(tag), Json(cinema)))
        }
        None => Err(lost_race(&state, id).await),
    }
}

/// PUT /cinemas/{id} -- requires `If-Match`; create-shaped payload.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<CreateCinema>,
) -> AppResult<impl IntoResponse> {
    let existing = find_cinema(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::require_if_match(&current, preconditions::if_match(&headers))?;

    match CinemaRepo::replace(&state.pool, id, existing.updated_at, &input).await? {
        Some(cinema) => {
            let tag = etag::compute(&cinema)?;
            tracing::info!(cinema_id = cinema.id, "Replaced cinema");
            Ok((etag_header(tag), Json(cinema)))
        }
        None => Err(lost_race(&state, id).await),
    }
}

/// DELETE /cinemas/{id} -- `If-Match` is optional.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let existing = find_cinema(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::check_if_match(&current, preconditions::if_match(&headers))?;

    if CinemaRepo::soft_delete(&state.pool, id, existing.updated_at).await? {
        tracing::info!(cinema_id = id, "Soft-deleted cinema");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(lost_race(&state, id).await)
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn find_cinema(state: &AppState, id: DbId) -> AppResult<Cinema> {
    CinemaRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Cinema",
            id,
        }))
}

/// Classify a compare-and-swap miss after a passing precondition check:
/// the row changed under us (412) or is gone (404).
async fn lost_race(state: &AppState, id: DbId) -> AppError {
    match CinemaRepo::find_by_id(&state.pool, id).await {
        Ok(Some(_)) => AppError::Core(CoreError::PreconditionFailed),
        Ok(None) => AppError::Core(CoreError::NotFound {
            entity: "Cinema",
            id,
        }),
        Err(e) => AppError::Database(e),
    }
}
