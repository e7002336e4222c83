//! SQLite storage backend implementation.
//!
//! This module provides a SQLite-based implementation of `LocaleRepository`
//! using `rusqlite` for synchronous operations and `tokio-rusqlite` for async wrapping.

mod conversions;
mod error;
mod repository;
mod scripts;

pub use repository::SqliteRepository;
pub use scripts::SqlScripts;
