//! Repository for the `cinemas` table.

use marquee_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::cinema::{Cinema, CinemaFilter, CreateCinema, UpdateCinema};

/// Column list shared across queries to avoid repetition. The soft-delete
/// columns are never selected; they exist in SQL only.
const COLUMNS: &str = "id, name, created_by, created_at, updated_at";

/// Provides CRUD operations for cinemas.
pub struct CinemaRepo;

impl CinemaRepo {
    /// Insert a new cinema, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateCinema) -> Result<Cinema, sqlx::Error> {
        let query = format!(
            "INSERT INTO cinemas (name, created_by)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cinema>(&query)
            .bind(&input.name)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a cinema by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Cinema>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cinemas WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Cinema>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List cinemas matching the given filters, ordered by ID.
    /// Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool, filter: &CinemaFilter) -> Result<Vec<Cinema>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM cinemas
             WHERE is_deleted = FALSE
               AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
             ORDER BY id"
        );
        sqlx::query_as::<_, Cinema>(&query)
            .bind(&filter.name)
            .fetch_all(pool)
            .await
    }

    /// Update a cinema. Only non-`None` fields in `input` are applied, and
    /// `updated_at` is refreshed.
    ///
    /// The UPDATE matches only while the row still carries `observed`
    /// as its `updated_at`. Returns `None` when no row matched: the row is
    /// gone, soft-deleted, or another writer committed first.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
        input: &UpdateCinema,
    ) -> Result<Option<Cinema>, sqlx::Error> {
        let query = format!(
            "UPDATE cinemas SET
                name = COALESCE($3, name),
                updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cinema>(&query)
            .bind(id)
            .bind(observed)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable field of a cinema from a create-shaped payload,
    /// refreshing `updated_at`. `created_by` is fixed at creation.
    ///
    /// Same compare-and-swap semantics as [`CinemaRepo::update`].
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
        input: &CreateCinema,
    ) -> Result<Option<Cinema>, sqlx::Error> {
        let query = format!(
            "UPDATE cinemas SET
                name = $3,
                updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cinema>(&query)
            .bind(id)
            .bind(observed)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a cinema: set the tombstone flag and timestamp. The row
    /// is never physically removed. Returns `true` if a row was marked
    /// deleted; same compare-and-swap semantics as [`CinemaRepo::update`].
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE cinemas SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(observed)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
