//! Route definitions for showtimes.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::showtime;
use crate::state::AppState;

/// Routes mounted at `/showtimes`.
///
/// ```text
/// GET    /                    -> list
/// POST   /                    -> create
/// GET    /{id}                -> get_by_id
/// PATCH  /{id}                -> update
/// PUT    /{id}                -> replace
/// DELETE /{id}                -> delete
/// GET    /{id}/availability   -> availability
/// POST   /{id}/seats          -> adjust_seats
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(showtime::list).post(showtime::create))
        .route(
            "/{id}",
            get(showtime::get_by_id)
                .patch(showtime::update)
                .put(showtime::replace)
                .delete(showtime::delete),
        )
        .route("/{id}/availability", get(showtime::availability))
        .route("/{id}/seats", post(showtime::adjust_seats))
}
