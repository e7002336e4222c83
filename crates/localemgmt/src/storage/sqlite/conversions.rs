//! Row to domain type conversions.

use localemgmt_core::locale::LocaleItem;
use rusqlite::Row;

/// Columns selected for a locale item, in the order `row_to_item` reads them.
pub const ITEM_COLUMNS: &str = "id, key, bundle, lang, content";

/// Converts a row selected with [`ITEM_COLUMNS`] to a `LocaleItem`.
pub fn row_to_item(row: &Row) -> rusqlite::Result<LocaleItem> {
    Ok(LocaleItem {
        id: Some(row.get(0)?),
        key: row.get(1)?,
        bundle: row.get(2)?,
        lang: row.get(3)?,
        content: row.get(4)?,
    })
}
