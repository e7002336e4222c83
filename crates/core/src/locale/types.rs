use serde::{Deserialize, Serialize};

use super::ItemValidationError;

/// A single translated string, identified by key + bundle + language.
///
/// `id` is assigned by the store and is `None` until the item has been
/// written. `(key, bundle, lang)` is the natural identity used for upserts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub key: String,
    pub bundle: String,
    pub lang: String,
    #[serde(default)]
    pub content: String,
}

impl LocaleItem {
    /// Creates a new, not yet stored, locale item.
    pub fn new(
        key: impl Into<String>,
        bundle: impl Into<String>,
        lang: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            key: key.into(),
            bundle: bundle.into(),
            lang: lang.into(),
            content: content.into(),
        }
    }

    /// Sets the store-assigned ID.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// Checks that key, bundle and lang are all present.
    ///
    /// Fields are checked in key, bundle, lang order and the first blank one
    /// is reported. `content` may be empty.
    pub fn validate(&self) -> Result<(), ItemValidationError> {
        if is_blank(&self.key) {
            return Err(ItemValidationError::MissingKey);
        }
        if is_blank(&self.bundle) {
            return Err(ItemValidationError::MissingBundle);
        }
        if is_blank(&self.lang) {
            return Err(ItemValidationError::MissingLang);
        }
        Ok(())
    }

    /// Returns true if the item can be written.
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

/// Outcome of a bulk upsert.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertReport {
    /// Number of items written in the committed transaction.
    pub written: u64,
    /// Input positions of the items that were skipped as invalid.
    pub skipped: Vec<usize>,
}

/// Returns true for the empty string only. Whitespace is a value.
pub fn is_blank(value: &str) -> bool {
    value.is_empty()
}
