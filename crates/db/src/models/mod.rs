//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - Filter parameters for the list queries where the entity has them

pub mod event;
pub mod guest;
pub mod user;
