//! Route definitions for cinemas.

use axum::routing::get;
use axum::Router;

use crate::handlers::cinema;
use crate::state::AppState;

/// Routes mounted at `/cinemas`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// GET    /{id}   -> get_by_id
/// PATCH  /{id}   -> update
/// PUT    /{id}   -> replace
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(cinema::list).post(cinema::create))
        .route(
            "/{id}",
            get(cinema::get_by_id)
                .patch(cinema::update)
                .put(cinema::replace)
                .delete(cinema::delete),
        )
}
