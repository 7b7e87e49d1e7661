//! HTTP request handlers.
//!
//! Thin translation layers between HTTP and the repository layer. Every
//! single-resource response carries an `ETag` header; PATCH/PUT/DELETE run
//! the conditional-request protocol before touching the store.

pub mod cinema;
pub mod screen;
pub mod showtime;
pub mod theatre;
