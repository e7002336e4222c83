//! Core for the localemgmt project.
//!
//! Pure types, traits and functions shared by the server, the auth crate and
//! the CLI client. Nothing in here performs I/O.

#[cfg(feature = "auth")]
pub mod auth;
pub mod locale;
pub mod storage;
