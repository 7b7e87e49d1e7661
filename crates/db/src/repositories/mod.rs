//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Soft-deleted rows are
//! filtered in the SQL here, never in handlers. Mutating methods are
//! compare-and-swap on the caller's observed `updated_at`: the UPDATE
//! matches only while the row still carries that timestamp, so exactly
//! one of two racing writers holding the same stale representation can
//! commit. Every successful mutation refreshes `updated_at`.

pub mod cinema_repo;
pub mod screen_repo;
pub mod showtime_repo;
pub mod theatre_repo;

pub use cinema_repo::CinemaRepo;
pub use screen_repo::ScreenRepo;
pub use showtime_repo::ShowtimeRepo;
pub use theatre_repo::TheatreRepo;
