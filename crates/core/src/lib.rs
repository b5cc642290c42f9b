//! Domain types and pure business rules for the guest check-in service.
//!
//! Nothing in this crate performs I/O. The database and HTTP layers call
//! into these rules so they can be tested in isolation.

pub mod error;
pub mod registration;
pub mod signin;
pub mod types;
