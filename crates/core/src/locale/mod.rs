mod error;
mod filter;
mod types;

pub use error::ItemValidationError;
pub use filter::{FilterField, LocaleFilter, WhereClause, LOCALE_ITEMS_TABLE};
pub use types::{is_blank, LocaleItem, UpsertReport};
