//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&PgPool` as the first argument.

pub mod event_repo;
pub mod guest_repo;
pub mod user_repo;

pub use event_repo::EventRepo;
pub use guest_repo::GuestRepo;
pub use user_repo::UserRepo;

/// Default page size for list queries.
pub const DEFAULT_LIMIT: i64 = 50;

/// Maximum page size for list queries.
pub const MAX_LIMIT: i64 = 500;

/// Resolve a requested page size into `1..=MAX_LIMIT`.
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

/// Resolve a requested offset, treating negatives as zero.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}
