//! Route definitions for theatres.

use axum::routing::get;
use axum::Router;

use crate::handlers::theatre;
use crate::state::AppState;

/// Routes mounted at `/theatres`.
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
        .route("/", get(theatre::list).post(theatre::create))
        .route(
            "/{id}",
            get(theatre::get_by_id)
                .patch(theatre::update)
                .put(theatre::replace)
                .delete(theatre::delete),
        )
}
