pub mod cinema;
pub mod health;
pub mod screen;
pub mod showtime;
pub mod theatre;

use axum::Router;

use crate::state::AppState;

/// Build the entity-collection route tree, mounted at the root.
///
/// Route hierarchy:
///
/// ```text
/// /cinemas                      list, create
/// /cinemas/{id}                 get, patch, put, delete
/// /theatres                     list, create
/// /theatres/{id}                get, patch, put, delete
/// /screens                      list, create
/// /screens/{id}                 get, patch, put, delete
/// /showtimes                    list, create
/// /showtimes/{id}               get, patch, put, delete
/// /showtimes/{id}/availability  seat counts
/// /showtimes/{id}/seats         signed booking delta (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/cinemas", cinema::router())
        .nest("/theatres", theatre::router())
        .nest("/screens", screen::router())
        .nest("/showtimes", showtime::router())
}
