//! Domain core for the marquee theatre service.
//!
//! Holds the shared ID/timestamp types, the error taxonomy, and the two
//! pieces of the optimistic-concurrency protocol: entity-tag computation
//! ([`etag`]) and the conditional-request decision logic ([`conditional`]).
//! Everything here is pure and independent of HTTP and the database.

pub mod conditional;
pub mod error;
pub mod etag;
pub mod types;
