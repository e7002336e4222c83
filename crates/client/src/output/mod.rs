//! Output formatting functions.

pub mod pretty;

use crate::cli::OutputFormat;

/// Render `value` as compact JSON, or with `pretty` for humans.
pub fn render<T, F>(value: &T, format: OutputFormat, pretty: F) -> String
where
    T: serde::Serialize,
    F: FnOnce(&T) -> String,
{
    match format {
        OutputFormat::Json => serde_json::to_string(value).unwrap_or_default(),
        OutputFormat::Pretty => pretty(value),
    }
}
