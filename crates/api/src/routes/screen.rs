//! Route definitions for screens.

use axum::routing::get;
use axum::Router;

use crate::handlers::screen;
use crate::state::AppState;

/// Routes mounted at `/screens`.
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
        .route("/", get(screen::list).post(screen::create))
        .route(
            "/{id}",
            get(screen::get_by_id)
                .patch(screen::update)
                .put(screen::replace)
                .delete(screen::delete),
        )
}
