//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//! - A `Deserialize` filter struct for list queries
//!
//! The entity struct doubles as the API representation, so the soft-delete
//! columns (`is_deleted`, `deleted_at`) are deliberately absent from it.

pub mod cinema;
pub mod screen;
pub mod showtime;
pub mod theatre;
