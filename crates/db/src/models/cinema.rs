//! Cinema entity model and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cinemas` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cinema {
    pub id: DbId,
    pub name: String,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new cinema. Also the PUT (full replace) payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCinema {
    pub name: String,
    pub created_by: Option<DbId>,
}

/// DTO for updating an existing cinema. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCinema {
    pub name: Option<String>,
}

/// Query filters for listing cinemas.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CinemaFilter {
    /// Case-insensitive substring match on the cinema name.
    pub name: Option<String>,
}
