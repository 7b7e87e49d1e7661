//! Repository for the `screens` table.

use marquee_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::screen::{CreateScreen, Screen, ScreenFilter, UpdateScreen};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, theatre_id, screen_number, num_rows, num_cols, created_by, \
    created_at, updated_at";

/// Provides CRUD operations for screens.
pub struct ScreenRepo;

impl ScreenRepo {
    /// Insert a new screen, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateScreen) -> Result<Screen, sqlx::Error> {
        let query = format!(
            "INSERT INTO screens (theatre_id, screen_number, num_rows, num_cols, created_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(input.theatre_id)
            .bind(input.screen_number)
            .bind(input.num_rows)
            .bind(input.num_cols)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a screen by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM screens WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List screens matching the given filters, ordered by ID.
    /// Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool, filter: &ScreenFilter) -> Result<Vec<Screen>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM screens
             WHERE is_deleted = FALSE
               AND ($1::bigint IS NULL OR theatre_id = $1)
               AND ($2::integer IS NULL OR screen_number = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(filter.theatre_id)
            .bind(filter.screen_number)
            .fetch_all(pool)
            .await
    }

    /// Update a screen. Only non-`None` fields in `input` are applied, and
    /// `updated_at` is refreshed.
    ///
    /// The UPDATE matches only while the row still carries `observed` as its
    /// `updated_at`. Returns `None` when no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
        input: &UpdateScreen,
    ) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!(
            "UPDATE screens SET
                theatre_id = COALESCE($3, theatre_id),
                screen_number = COALESCE($4, screen_number),
                num_rows = COALESCE($5, num_rows),
                num_cols = COALESCE($6, num_cols),
                updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .bind(observed)
            .bind(input.theatre_id)
            .bind(input.screen_number)
            .bind(input.num_rows)
            .bind(input.num_cols)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable field of a screen from a create-shaped payload,
    /// refreshing `updated_at`. `created_by` is fixed at creation.
    ///
    /// Same compare-and-swap semantics as [`ScreenRepo::update`].
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
        input: &CreateScreen,
    ) -> Result<Option<Screen>, sqlx::Error> {
        let query = format!(
            "UPDATE screens SET
                theatre_id = $3,
                screen_number = $4,
                num_rows = $5,
                num_cols = $6,
                updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Screen>(&query)
            .bind(id)
            .bind(observed)
            .bind(input.theatre_id)
            .bind(input.screen_number)
            .bind(input.num_rows)
            .bind(input.num_cols)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a screen: set the tombstone flag and timestamp. Returns
    /// `true` if a row was marked deleted; same compare-and-swap semantics
    /// as [`ScreenRepo::update`].
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE screens SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(observed)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
