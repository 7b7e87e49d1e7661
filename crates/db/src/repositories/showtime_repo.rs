//! Repository for the `showtimes` table.

use marquee_core::types::{DbId, Timestamp};
use sqlx::PgPool;

use crate::models::showtime::{CreateShowtime, Showtime, ShowtimeFilter, UpdateShowtime};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, screen_id, movie_id, start_time, price, seats_booked, created_by, \
    created_at, updated_at";

/// Provides CRUD operations for showtimes, plus the seat-count delta used
/// by the booking flow.
pub struct ShowtimeRepo;

impl ShowtimeRepo {
    /// Insert a new showtime, returning the created row.
    ///
    /// If `seats_booked` is `None`, defaults to 0.
    pub async fn create(pool: &PgPool, input: &CreateShowtime) -> Result<Showtime, sqlx::Error> {
        let query = format!(
            "INSERT INTO showtimes (screen_id, movie_id, start_time, price, seats_booked, created_by)
             VALUES ($1, $2, $3, $4, COALESCE($5, 0), $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Showtime>(&query)
            .bind(input.screen_id)
            .bind(input.movie_id)
            .bind(input.start_time)
            .bind(input.price)
            .bind(input.seats_booked)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a showtime by its ID. Excludes soft-deleted rows.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Showtime>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM showtimes WHERE id = $1 AND is_deleted = FALSE");
        sqlx::query_as::<_, Showtime>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List showtimes matching the given filters, ordered by start time.
    /// Excludes soft-deleted rows.
    pub async fn list(
        pool: &PgPool,
        filter: &ShowtimeFilter,
    ) -> Result<Vec<Showtime>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM showtimes
             WHERE is_deleted = FALSE
               AND ($1::bigint IS NULL OR screen_id = $1)
               AND ($2::bigint IS NULL OR movie_id = $2)
               AND ($3::timestamptz IS NULL OR start_time >= $3)
             ORDER BY start_time, id"
        );
        sqlx::query_as::<_, Showtime>(&query)
            .bind(filter.screen_id)
            .bind(filter.movie_id)
            .bind(filter.start_time_after)
            .fetch_all(pool)
            .await
    }

    /// Update a showtime. Only non-`None` fields in `input` are applied, and
    /// `updated_at` is refreshed.
    ///
    /// The UPDATE matches only while the row still carries `observed` as its
    /// `updated_at`. Returns `None` when no row matched.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
        input: &UpdateShowtime,
    ) -> Result<Option<Showtime>, sqlx::Error> {
        let query = format!(
            "UPDATE showtimes SET
                screen_id = COALESCE($3, screen_id),
                movie_id = COALESCE($4, movie_id),
                start_time = COALESCE($5, start_time),
                price = COALESCE($6, price),
                seats_booked = COALESCE($7, seats_booked),
                updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Showtime>(&query)
            .bind(id)
            .bind(observed)
            .bind(input.screen_id)
            .bind(input.movie_id)
            .bind(input.start_time)
            .bind(input.price)
            .bind(input.seats_booked)
            .fetch_optional(pool)
            .await
    }

    /// Replace every mutable field of a showtime from a create-shaped
    /// payload, refreshing `updated_at`. `created_by` is fixed at creation.
    ///
    /// Same compare-and-swap semantics as [`ShowtimeRepo::update`].
    pub async fn replace(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
        input: &CreateShowtime,
    ) -> Result<Option<Showtime>, sqlx::Error> {
        let query = format!(
            "UPDATE showtimes SET
                screen_id = $3,
                movie_id = $4,
                start_time = $5,
                price = $6,
                seats_booked = COALESCE($7, 0),
                updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Showtime>(&query)
            .bind(id)
            .bind(observed)
            .bind(input.screen_id)
            .bind(input.movie_id)
            .bind(input.start_time)
            .bind(input.price)
            .bind(input.seats_booked)
            .fetch_optional(pool)
            .await
    }

    /// Soft-delete a showtime: set the tombstone flag and timestamp. Returns
    /// `true` if a row was marked deleted; same compare-and-swap semantics
    /// as [`ShowtimeRepo::update`].
    pub async fn soft_delete(
        pool: &PgPool,
        id: DbId,
        observed: Timestamp,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE showtimes SET is_deleted = TRUE, deleted_at = NOW(), updated_at = NOW()
             WHERE id = $1 AND updated_at = $2 AND is_deleted = FALSE",
        )
        .bind(id)
        .bind(observed)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Apply a signed seat-count delta to a showtime.
    ///
    /// The UPDATE itself re-validates the capacity bound against the owning
    /// screen (`0 <= seats_booked + delta <= num_rows * num_cols`), so a
    /// racing delta cannot push the count out of range. Returns `None` when
    /// no row matched: the showtime or its screen is gone, or the resulting
    /// count would violate the bound.
    pub async fn adjust_seats(
        pool: &PgPool,
        id: DbId,
        delta: i32,
    ) -> Result<Option<Showtime>, sqlx::Error> {
        let query = "UPDATE showtimes SET
                seats_booked = showtimes.seats_booked + $2,
                updated_at = NOW()
             FROM screens
             WHERE showtimes.id = $1
               AND showtimes.is_deleted = FALSE
               AND screens.id = showtimes.screen_id
               AND screens.is_deleted = FALSE
               AND showtimes.seats_booked + $2 >= 0
               AND showtimes.seats_booked + $2 <= screens.num_rows * screens.num_cols
             RETURNING showtimes.id, showtimes.screen_id, showtimes.movie_id,
                 showtimes.start_time, showtimes.price, showtimes.seats_booked,
                 showtimes.created_by, showtimes.created_at, showtimes.updated_at";
        sqlx::query_as::<_, Showtime>(query)
            .bind(id)
            .bind(delta)
            .fetch_optional(pool)
            .await
    }
}
