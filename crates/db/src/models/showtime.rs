//! Showtime entity model and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `showtimes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Showtime {
    pub id: DbId,
    pub screen_id: DbId,
    /// Reference into the external movie catalogue; not a local foreign key.
    pub movie_id: DbId,
    pub start_time: Timestamp,
    pub price: f64,
    pub seats_booked: i32,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new showtime. Also the PUT (full replace) payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateShowtime {
    pub screen_id: DbId,
    pub movie_id: DbId,
    pub start_time: Timestamp,
    pub price: f64,
    /// Defaults to 0 if omitted.
    pub seats_booked: Option<i32>,
    pub created_by: Option<DbId>,
}

/// DTO for updating an existing showtime. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateShowtime {
    pub screen_id: Option<DbId>,
    pub movie_id: Option<DbId>,
    pub start_time: Option<Timestamp>,
    pub price: Option<f64>,
    pub seats_booked: Option<i32>,
}

/// Query filters for listing showtimes.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowtimeFilter {
    pub screen_id: Option<DbId>,
    pub movie_id: Option<DbId>,
    /// Keep only showtimes starting at or after this instant.
    pub start_time_after: Option<Timestamp>,
}
