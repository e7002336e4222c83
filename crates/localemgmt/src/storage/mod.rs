//! Storage backend implementations.
//!
//! Concrete implementations of `LocaleRepository` from
//! `localemgmt_core::storage`. SQLite is the only backend.

pub mod sqlite;

pub use sqlite::{SqlScripts, SqliteRepository};
