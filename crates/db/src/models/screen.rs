//! Screen entity model and DTOs.

use marquee_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `screens` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Screen {
    pub id: DbId,
    pub theatre_id: DbId,
    pub screen_number: i32,
    pub num_rows: i32,
    pub num_cols: i32,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Screen {
    /// Total seating capacity of the screen's grid.
    pub fn total_seats(&self) -> i32 {
        self.num_rows * self.num_cols
    }
}

/// DTO for creating a new screen. Also the PUT (full replace) payload.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateScreen {
    pub theatre_id: DbId,
    pub screen_number: i32,
    pub num_rows: i32,
    pub num_cols: i32,
    pub created_by: Option<DbId>,
}

/// DTO for updating an existing screen. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateScreen {
    pub theatre_id: Option<DbId>,
    pub screen_number: Option<i32>,
    pub num_rows: Option<i32>,
    pub num_cols: Option<i32>,
}

/// Query filters for listing screens.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScreenFilter {
    pub theatre_id: Option<DbId>,
    pub screen_number: Option<i32>,
}
