//! Integration tests for entity CRUD operations.
//!
//! Exercises the full repository layer against a real database:
//! - Create full hierarchy (cinema -> theatre -> screen -> showtime)
//! - Defaults applied on insert
//! - List filtering
//! - Partial update and full replace
//! - Compare-and-swap update semantics
//! - Seat-count delta bounds

use chrono::{Duration, TimeZone, Utc};
use marquee_db::models::cinema::{CinemaFilter, CreateCinema, UpdateCinema};
use marquee_db::models::screen::{CreateScreen, ScreenFilter};
use marquee_db::models::showtime::{CreateShowtime, ShowtimeFilter};
use marquee_db::models::theatre::{CreateTheatre, TheatreFilter, UpdateTheatre};
use marquee_db::repositories::{CinemaRepo, ScreenRepo, ShowtimeRepo, TheatreRepo};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_cinema(name: &str) -> CreateCinema {
    CreateCinema {
        name: name.to_string(),
        created_by: None,
    }
}

fn new_theatre(cinema_id: i64, name: &str) -> CreateTheatre {
    CreateTheatre {
        cinema_id,
        name: name.to_string(),
        address: "1 Main Street".to_string(),
        screen_count: None,
        created_by: None,
    }
}

fn new_screen(theatre_id: i64, number: i32) -> CreateScreen {
    CreateScreen {
        theatre_id,
        screen_number: number,
        num_rows: 10,
        num_cols: 20,
        created_by: None,
    }
}

fn new_showtime(screen_id: i64, movie_id: i64) -> CreateShowtime {
    CreateShowtime {
        screen_id,
        movie_id,
        start_time: Utc.with_ymd_and_hms(2025, 6, 1, 19, 30, 0).unwrap(),
        price: 12.5,
        seats_booked: None,
        created_by: None,
    }
}

// ---------------------------------------------------------------------------
// Test: create full hierarchy with defaults
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_create_hierarchy_applies_defaults(pool: PgPool) {
    let cinema = CinemaRepo::create(&pool, &new_cinema("Grand Odeon"))
        .await
        .unwrap();
    assert_eq!(cinema.name, "Grand Odeon");
    assert!(cinema.created_by.is_none());

    let theatre = TheatreRepo::create(&pool, &new_theatre(cinema.id, "Main Hall"))
        .await
        .unwrap();
    assert_eq!(theatre.cinema_id, cinema.id);
    assert_eq!(theatre.screen_count, 0, "screen_count defaults to 0");

    let screen = ScreenRepo::create(&pool, &new_screen(theatre.id, 1))
        .await
        .unwrap();
    assert_eq!(screen.theatre_id, theatre.id);
    assert_eq!(screen.total_seats(), 200);

    let showtime = ShowtimeRepo::create(&pool, &new_showtime(screen.id, 42))
        .await
        .unwrap();
    assert_eq!(showtime.screen_id, screen.id);
    assert_eq!(showtime.seats_booked, 0, "seats_booked defaults to 0");

    let found = ShowtimeRepo::find_by_id(&pool, showtime.id).await.unwrap();
    assert_eq!(found.unwrap().id, showtime.id);
}

// ---------------------------------------------------------------------------
// Test: cinema list filters by name substring, case-insensitively
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_cinema_list_filters_by_name_substring(pool: PgPool) {
    CinemaRepo::create(&pool, &new_cinema("Grand Odeon"))
        .await
        .unwrap();
    CinemaRepo::create(&pool, &new_cinema("Rialto")).await.unwrap();

    let all = CinemaRepo::list(&pool, &CinemaFilter::default())
        .await
        .unwrap();
    assert_eq!(all.len(), 2);

    let filtered = CinemaRepo::list(
        &pool,
        &CinemaFilter {
            name: Some("odeon".to_string()),
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "Grand Odeon");
}

// ---------------------------------------------------------------------------
// Test: theatre list filters by owning cinema
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_theatre_list_filters_by_cinema(pool: PgPool) {
    let a = CinemaRepo::create(&pool, &new_cinema("A")).await.unwrap();
    let b = CinemaRepo::create(&pool, &new_cinema("B")).await.unwrap();

    TheatreRepo::create(&pool, &new_theatre(a.id, "North"))
        .await
        .unwrap();
    TheatreRepo::create(&pool, &new_theatre(b.id, "South"))
        .await
        .unwrap();

    let filtered = TheatreRepo::list(
        &pool,
        &TheatreFilter {
            cinema_id: Some(a.id),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].name, "North");
}

// ---------------------------------------------------------------------------
// Test: screen list filters by theatre and screen number
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_screen_list_filters(pool: PgPool) {
    let cinema = CinemaRepo::create(&pool, &new_cinema("C")).await.unwrap();
    let theatre = TheatreRepo::create(&pool, &new_theatre(cinema.id, "T"))
        .await
        .unwrap();

    ScreenRepo::create(&pool, &new_screen(theatre.id, 1))
        .await
        .unwrap();
    ScreenRepo::create(&pool, &new_screen(theatre.id, 2))
        .await
        .unwrap();

    let by_number = ScreenRepo::list(
        &pool,
        &ScreenFilter {
            theatre_id: Some(theatre.id),
            screen_number: Some(2),
        },
    )
    .await
    .unwrap();
    assert_eq!(by_number.len(), 1);
    assert_eq!(by_number[0].screen_number, 2);
}

// ---------------------------------------------------------------------------
// Test: showtime list filters by movie and start time
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_showtime_list_filters(pool: PgPool) {
    let cinema = CinemaRepo::create(&pool, &new_cinema("C")).await.unwrap();
    let theatre = TheatreRepo::create(&pool, &new_theatre(cinema.id, "T"))
        .await
        .unwrap();
    let screen = ScreenRepo::create(&pool, &new_screen(theatre.id, 1))
        .await
        .unwrap();

    let mut early = new_showtime(screen.id, 1);
    early.start_time = Utc.with_ymd_and_hms(2025, 6, 1, 14, 0, 0).unwrap();
    ShowtimeRepo::create(&pool, &early).await.unwrap();

    let mut late = new_showtime(screen.id, 2);
    late.start_time = Utc.with_ymd_and_hms(2025, 6, 1, 21, 0, 0).unwrap();
    ShowtimeRepo::create(&pool, &late).await.unwrap();

    let by_movie = ShowtimeRepo::list(
        &pool,
        &ShowtimeFilter {
            movie_id: Some(2),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(by_movie.len(), 1);
    assert_eq!(by_movie[0].movie_id, 2);

    let after = ShowtimeRepo::list(
        &pool,
        &ShowtimeFilter {
            start_time_after: Some(Utc.with_ymd_and_hms(2025, 6, 1, 18, 0, 0).unwrap()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(after.len(), 1);
    assert_eq!(after[0].movie_id, 2);
}

// ---------------------------------------------------------------------------
// Test: partial update applies only provided fields and refreshes updated_at
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_partial_update_applies_only_provided_fields(pool: PgPool) {
    let cinema = CinemaRepo::create(&pool, &new_cinema("C")).await.unwrap();
    let theatre = TheatreRepo::create(&pool, &new_theatre(cinema.id, "Old Name"))
        .await
        .unwrap();

    let updated = TheatreRepo::update(
        &pool,
        theatre.id,
        theatre.updated_at,
        &UpdateTheatre {
            name: Some("New Name".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap()
    .expect("update with observed timestamp should match");

    assert_eq!(updated.name, "New Name");
    assert_eq!(updated.address, theatre.address, "address untouched");
    assert!(
        updated.updated_at > theatre.updated_at,
        "updated_at must be refreshed by every mutation"
    );
}

// ---------------------------------------------------------------------------
// Test: update with a stale observed timestamp matches no row
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_update_with_stale_observation_matches_nothing(pool: PgPool) {
    let cinema = CinemaRepo::create(&pool, &new_cinema("Unchanged"))
        .await
        .unwrap();

    let stale = cinema.updated_at - Duration::seconds(1);
    let result = CinemaRepo::update(
        &pool,
        cinema.id,
        stale,
        &UpdateCinema {
            name: Some("Should Not Apply".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(result.is_none(), "stale observation must not commit");

    let found = CinemaRepo::find_by_id(&pool, cinema.id).await.unwrap().unwrap();
    assert_eq!(found.name, "Unchanged", "losing writer must not mutate");
}

// ---------------------------------------------------------------------------
// Test: only one of two writers holding the same observation commits
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_second_writer_with_same_observation_loses(pool: PgPool) {
    let cinema = CinemaRepo::create(&pool, &new_cinema("Original"))
        .await
        .unwrap();

    let first = CinemaRepo::update(
        &pool,
        cinema.id,
        cinema.updated_at,
        &UpdateCinema {
            name: Some("First Writer".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(first.is_some());

    let second = CinemaRepo::update(
        &pool,
        cinema.id,
        cinema.updated_at,
        &UpdateCinema {
            name: Some("Second Writer".to_string()),
        },
    )
    .await
    .unwrap();
    assert!(second.is_none(), "replayed observation must lose the race");
}

// ---------------------------------------------------------------------------
// Test: replace resets omitted defaultable fields
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_replace_resets_every_mutable_field(pool: PgPool) {
    let cinema = CinemaRepo::create(&pool, &new_cinema("C")).await.unwrap();
    let mut input = new_theatre(cinema.id, "T");
    input.screen_count = Some(4);
    let theatre = TheatreRepo::create(&pool, &input).await.unwrap();
    assert_eq!(theatre.screen_count, 4);

    let replaced = TheatreRepo::replace(
        &pool,
        theatre.id,
        theatre.updated_at,
        &new_theatre(cinema.id, "Replacement"),
    )
    .await
    .unwrap()
    .unwrap();

    assert_eq!(replaced.name, "Replacement");
    assert_eq!(
        replaced.screen_count, 0,
        "replace with omitted screen_count falls back to the default"
    );
}

// ---------------------------------------------------------------------------
// Test: seat delta is bounded by the owning screen's capacity
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../migrations")]
async fn test_adjust_seats_enforces_capacity_bounds(pool: PgPool) {
    let cinema = CinemaRepo::create(&pool, &new_cinema("C")).await.unwrap();
    let theatre = TheatreRepo::create(&pool, &new_theatre(cinema.id, "T"))
        .await
        .unwrap();
    let screen = ScreenRepo::create(&pool, &new_screen(theatre.id, 1))
        .await
        .unwrap();
    let showtime = ShowtimeRepo::create(&pool, &new_showtime(screen.id, 7))
        .await
        .unwrap();

    let booked = ShowtimeRepo::adjust_seats(&pool, showtime.id, 200)
        .await
        .unwrap()
        .expect("booking up to capacity succeeds");
    assert_eq!(booked.seats_booked, 200);

    let over = ShowtimeRepo::adjust_seats(&pool, showtime.id, 1)
        .await
        .unwrap();
    assert!(over.is_none(), "overbooking matches no row");

    let released = ShowtimeRepo::adjust_seats(&pool, showtime.id, -200)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(released.seats_booked, 0);

    let under = ShowtimeRepo::adjust_seats(&pool, showtime.id, -1)
        .await
        .unwrap();
    assert!(under.is_none(), "releasing below zero matches no row");
}
