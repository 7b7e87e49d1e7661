//! Theatre entity model and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `theatres` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Theatre {
    pub id: DbId,
    pub cinema_id: DbId,
    pub name: String,
    pub address: String,
    pub screen_count: i32,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new theatre. Also the PUT (full replace) payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTheatre {
    pub cinema_id: DbId,
    pub name: String,
    pub address: String,
    /// Defaults to 0 if omitted.
    pub screen_count: Option<i32>,
    pub created_by: Option<DbId>,
}

/// DTO for updating an existing theatre. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTheatre {
    pub cinema_id: Option<DbId>,
    pub name: Option<String>,
    pub address: Option<String>,
    pub screen_count: Option<i32>,
}

/// Query filters for listing theatres.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TheatreFilter {
    /// Case-insensitive substring match on the theatre name.
    pub name: Option<String>,
    pub cinema_id: Option<DbId>,
}
