//! Repository for the `theatres` table.

use marquee_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::theatre::{CreateTheatre, Theatre, TheatreFilter, UpdateTheatre};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, cinema_id, name, address, screen_count, created_by, \
    created_at, updated_at";

/// Provides CRUD operations for theatres.
pub struct TheatreRepo;

impl TheatreRepo {
    /// Insert a new theatre, returning the created row.
    ///
    /// If `screen_count` is `None`, defaults to 0.
    pub async fn create(pool: &PgPool, input: &CreateTheatre) -> Result<Theatre, sqlx::Error> {
        let query = format!(
            "INSERT INTO theatres (cinema_id, name, address, screen_count, created_by)
             VALUES ($1, $2, $3, COALESCE($4, 0), $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Theatre>(&query)
            .bind(input.cinema_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(input.screen_count)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a theatre by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Theatre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM theatres WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Theatre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List theatres matching the given filters, ordered by ID.
    /// Excludes soft-deleted rows.
    pub async fn list(pool: &PgPool, filter: &TheatreFilter) -> Result<Vec<Theatre>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM theatres
             WHERE is_deleted = FALSE
               AND ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
               AND ($2::bigint IS NULL OR cinema_id = $2)
             ORDER BY id"
        );
        sqlx::query_as::<_, Theatre>(&query)
            .bind(&filter.name)
            .bind(filter.cinema_id)
            .fetch_all(pool)
            .await
    }

    /// Update a theatre. Only non-`None` fields in `input` are applied, and
    /// `updated_at` is refreshed.
    ///
    /// The UPDATE matches only while the row still carries `observed` as its
    /// `updated_at`. Returns `None` when no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
        input: &UpdateTheatre,
    ) -> Result<Option<Theatre>, sqlx::Error> {
        let query = format!(
            "UPDATE theatres SET
                cinema_id = COALESCE($3, cinema_id),
                name = COALESCE($4, name),
                address = COALESCE($5, address),
                screen_count = COALESCE($6, screen_count),
                updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Theatre>(&query)
            .bind(id)
            .bind(observed)
            .bind(input.cinema_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(input.screen_count)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable field of a theatre from a create-shaped payload,
    /// refreshing `updated_at`. `created_by` is fixed at creation.
    ///
    /// Same compare-and-swap semantics as [`TheatreRepo::update`].
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
        input: &CreateTheatre,
    ) -> Result<Option<Theatre>, sqlx::Error> {
        let query = format!(
            "UPDATE theatres SET
                cinema_id = $3,
                name = $4,
                address = $5,
                screen_count = COALESCE($6, 0),
                updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Theatre>(&query)
            .bind(id)
            .bind(observed)
            .bind(input.cinema_id)
            .bind(&input.name)
            .bind(&input.address)
            .bind(input.screen_count)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a theatre: set the tombstone flag and timestamp. Returns
    /// `true` if a row was marked deleted; same compare-and-swap semantics
    /// as [`TheatreRepo::update`].
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE theatres SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(observed)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
