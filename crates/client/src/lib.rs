//! localemgmt_client - CLI client for the locale management API.

pub mod cli;
pub mod client;
pub mod error;
pub mod output;

pub use client::LocaleClient;
pub use error::{ClientError, Result};
