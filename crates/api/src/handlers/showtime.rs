//! Handlers for the `/showtimes` resource.
//!
//! On top of the usual CRUD surface, showtimes expose a seat-availability
//! read and a signed seat-count delta used by the booking flow. The booked
//! count is bounded by the owning screen's `num_rows * num_cols` everywhere
//! it can change.

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use marquee_core::error::CoreError;
use marquee_core::types::DbId;
use marquee_core::{conditional, etag};
use marquee_db::models::screen::Screen;
use marquee_db::models::showtime::{CreateShowtime, Showtime, ShowtimeFilter, UpdateShowtime};
use marquee_db::repositories::{ScreenRepo, ShowtimeRepo};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::preconditions::{self, etag_header};
use crate::state::AppState;

/// Request body for the seat-count delta endpoint. A positive count books
/// seats, a negative count releases them.
#[derive(Debug, Deserialize)]
pub struct SeatAdjustment {
    pub count: i32,
}

/// Seat counts for a showtime, derived from its screen's grid.
#[derive(Debug, Serialize)]
pub struct SeatAvailability {
    pub showtime_id: DbId,
    pub screen_id: DbId,
    pub total_seats: i32,
    pub seats_booked: i32,
    pub seats_available: i32,
}

/// POST /showtimes
pub async fn create(
    State(state): State<AppState>,
    Json(input): Json<CreateShowtime>,
) -> AppResult<impl IntoResponse> {
    let screen = find_owning_screen(&state, input.screen_id).await?;
    ensure_booked_within_capacity(&screen, input.seats_booked.unwrap_or(0))?;

    let showtime = ShowtimeRepo::create(&state.pool, &input).await?;
    let tag = etag::compute(&showtime)?;
    tracing::info!(showtime_id = showtime.id, screen_id = showtime.screen_id, "Created showtime");
    Ok((StatusCode::CREATED, etag_header(tag), Json(showtime)))
}

/// GET /showtimes
pub async fn list(
    State(state): State<AppState>,
    Query(filter): Query<ShowtimeFilter>,
) -> AppResult<Json<Vec<Showtime>>> {
    let showtimes = ShowtimeRepo::list(&state.pool, &filter).await?;
    Ok(Json(showtimes))
}

/// GET /showtimes/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<Response> {
    let showtime = find_showtime(&state, id).await?;
    let tag = etag::compute(&showtime)?;

    if conditional::is_not_modified(&tag, preconditions::if_none_match(&headers)) {
        return Ok((StatusCode::NOT_MODIFIED, etag_header(tag)).into_response());
    }
    Ok((etag_header(tag), Json(showtime)).into_response())
}

/// PATCH /showtimes/{id} -- requires `If-Match`.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<UpdateShowtime>,
) -> AppResult<impl IntoResponse> {
    let existing = find_showtime(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::require_if_match(&current, preconditions::if_match(&headers))?;

    // The booked count must fit the screen the showtime will end up on,
    // whether the payload moves it, rebooks it, or both.
    if input.screen_id.is_some() || input.seats_booked.is_some() {
        let screen =
            find_owning_screen(&state, input.screen_id.unwrap_or(existing.screen_id)).await?;
        ensure_booked_within_capacity(
            &screen,
            input.seats_booked.unwrap_or(existing.seats_booked),
        )?;
    }

    match ShowtimeRepo::update(&state.pool, id, existing.updated_at, &input).await? {
        Some(showtime) => {
            let tag = etag::compute(&showtime)?;
            tracing::info!(showtime_id = showtime.id, "Updated showtime");
            Ok((etag_header(tag), Json(showtime)))
        }
        None => Err(lost_race(&state, id).await),
    }
}

/// PUT /showtimes/{id} -- requires `If-Match`; create-shaped payload.
pub async fn replace(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
    Json(input): Json<CreateShowtime>,
) -> AppResult<impl IntoResponse> {
    let existing = find_showtime(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::require_if_match(&current, preconditions::if_match(&headers))?;

    let screen = find_owning_screen(&state, input.screen_id).await?;
    ensure_booked_within_capacity(&screen, input.seats_booked.unwrap_or(0))?;

    match ShowtimeRepo::replace(&state.pool, id, existing.updated_at, &input).await? {
        Some(showtime) => {
            let tag = etag::compute(&showtime)?;
            tracing::info!(showtime_id = showtime.id, "Replaced showtime");
            Ok((etag_header(tag), Json(showtime)))
        }
        None => Err(lost_race(&state, id).await),
    }
}

/// DELETE /showtimes/{id} -- `If-Match` is optional.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    headers: HeaderMap,
) -> AppResult<StatusCode> {
    let existing = find_showtime(&state, id).await?;
    let current = etag::compute(&existing)?;
    conditional::check_if_match(&current, preconditions::if_match(&headers))?;

    if ShowtimeRepo::soft_delete(&state.pool, id, existing.updated_at).await? {
        tracing::info!(showtime_id = id, "Soft-deleted showtime");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(lost_race(&state, id).await)
    }
}

/// GET /showtimes/{id}/availability
pub async fn availability(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<SeatAvailability>> {
    let showtime = find_showtime(&state, id).await?;
    let screen = find_owning_screen(&state, showtime.screen_id).await?;

    let total_seats = screen.total_seats();
    Ok(Json(SeatAvailability {
        showtime_id: showtime.id,
        screen_id: screen.id,
        total_seats,
        seats_booked: showtime.seats_booked,
        seats_available: total_seats - showtime.seats_booked,
    }))
}

/// POST /showtimes/{id}/seats
///
/// Applies the signed delta. The repository UPDATE re-validates the bound,
/// so a racing delta cannot push the count out of range even after the
/// check here passes.
pub async fn adjust_seats(
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<SeatAdjustment>,
) -> AppResult<impl IntoResponse> {
    let showtime = find_showtime(&state, id).await?;
    let screen = find_owning_screen(&state, showtime.screen_id).await?;
    reject_out_of_bounds(&screen, showtime.seats_booked, input.count)?;

    match ShowtimeRepo::adjust_seats(&state.pool, id, input.count).await? {
        Some(updated) => {
            let tag = etag::compute(&updated)?;
            tracing::info!(
                showtime_id = id,
                delta = input.count,
                seats_booked = updated.seats_booked,
                "Adjusted seat count"
            );
            Ok((etag_header(tag), Json(updated)))
        }
        None => {
            // A concurrent delta moved the count; report against fresh state.
            let fresh = find_showtime(&state, id).await?;
            reject_out_of_bounds(&screen, fresh.seats_booked, input.count)?;
            Err(AppError::InternalError(
                "seat adjustment did not apply".to_string(),
            ))
        }
    }
}

// ---------------------------------------------------------------------------
// Shared helpers
// ---------------------------------------------------------------------------

async fn find_showtime(state: &AppState, id: DbId) -> AppResult<Showtime> {
    ShowtimeRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Showtime",
            id,
        }))
}

/// Fetch the referenced screen, rejecting when it is missing or
/// soft-deleted.
async fn find_owning_screen(state: &AppState, screen_id: DbId) -> AppResult<Screen> {
    ScreenRepo::find_by_id(&state.pool, screen_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Screen",
            id: screen_id,
        }))
}

/// The invariant `0 <= seats_booked <= total capacity`, applied to a
/// payload-supplied booked count.
fn ensure_booked_within_capacity(screen: &Screen, seats_booked: i32) -> AppResult<()> {
    if seats_booked < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "seats_booked cannot be negative".to_string(),
        )));
    }
    if seats_booked > screen.total_seats() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "seats_booked cannot exceed screen capacity of {} seats",
            screen.total_seats()
        ))));
    }
    Ok(())
}

/// The same invariant, applied to a signed delta against the current count.
fn reject_out_of_bounds(screen: &Screen, seats_booked: i32, delta: i32) -> AppResult<()> {
    let new_count = seats_booked + delta;
    if new_count < 0 {
        return Err(AppError::Core(CoreError::Validation(
            "Cannot release more seats than are currently booked".to_string(),
        )));
    }
    if new_count > screen.total_seats() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Cannot book more seats than available. Total seats: {}, Already booked: {}",
            screen.total_seats(),
            seats_booked
        ))));
    }
    Ok(())
}

/// Classify a compare-and-swap miss after a passing precondition check:
/// the row changed under us (412) or is gone (404).
async fn lost_race(state: &AppState, id: DbId) -> AppError {
    match ShowtimeRepo::find_by_id(&state.pool, id).await {
        Ok(Some(_)) => AppError::Core(CoreError::PreconditionFailed),
        Ok(None) => AppError::Core(CoreError::NotFound {
            entity: "Showtime",
            id,
        }),
        Err(e) => AppError::Database(e),
    }
}
