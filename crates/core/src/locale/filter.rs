//! Conjunctive equality filters over locale items.
//!
//! A filter is a sparse set of optional constraints on `key`, `bundle` and
//! `lang`. Rendering it produces a parameterized SQL fragment that only
//! mentions the present constraints, in that fixed order. An empty filter
//! renders to no WHERE clause at all, which matches every row.

use std::fmt::Write as _;

use super::types::is_blank;

/// Name of the locale items table used by rendered clauses.
pub const LOCALE_ITEMS_TABLE: &str = "localeitems";

/// A filterable locale item column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    Key,
    Bundle,
    Lang,
}

impl FilterField {
    /// Column name in the `localeitems` table.
    pub fn column(&self) -> &'static str {
        match self {
            FilterField::Key => "key",
            FilterField::Bundle => "bundle",
            FilterField::Lang => "lang",
        }
    }
}

/// Optional equality constraints on key, bundle and lang.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocaleFilter {
    pub key: Option<String>,
    pub bundle: Option<String>,
    pub lang: Option<String>,
}

/// A rendered filter: SQL fragment plus its positional parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WhereClause {
    /// Either empty or a fragment starting with `" WHERE "`.
    pub sql: String,
    /// Values bound to `?1`, `?2`, ... in order.
    pub params: Vec<String>,
}

impl LocaleFilter {
    /// A filter that matches every item.
    pub fn all() -> Self {
        Self::default()
    }

    /// Builds a filter from raw request parameters.
    ///
    /// An empty parameter means "any value", not "match empty".
    pub fn from_params(key: &str, bundle: &str, lang: &str) -> Self {
        Self {
            key: non_blank(key),
            bundle: non_blank(bundle),
            lang: non_blank(lang),
        }
    }

    /// Same as [`LocaleFilter::from_params`] for optional parameters.
    pub fn from_optional(key: Option<&str>, bundle: Option<&str>, lang: Option<&str>) -> Self {
        Self::from_params(
            key.unwrap_or_default(),
            bundle.unwrap_or_default(),
            lang.unwrap_or_default(),
        )
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = non_blank(&key.into());
        self
    }

    pub fn with_bundle(mut self, bundle: impl Into<String>) -> Self {
        self.bundle = non_blank(&bundle.into());
        self
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = non_blank(&lang.into());
        self
    }

    /// Returns true if no constraint is present.
    pub fn is_empty(&self) -> bool {
        self.key.is_none() && self.bundle.is_none() && self.lang.is_none()
    }

    /// Present constraints in key, bundle, lang order.
    pub fn constraints(&self) -> Vec<(FilterField, &str)> {
        [
            (FilterField::Key, self.key.as_deref()),
            (FilterField::Bundle, self.bundle.as_deref()),
            (FilterField::Lang, self.lang.as_deref()),
        ]
        .into_iter()
        .filter_map(|(field, value)| value.map(|v| (field, v)))
        .collect()
    }

    /// Renders the filter as a parameterized WHERE clause.
    ///
    /// # Examples
    ///
    /// ```
    /// use localemgmt_core::locale::LocaleFilter;
    ///
    /// let clause = LocaleFilter::from_params("", "app", "en").to_where_clause();
    /// assert_eq!(
    ///     clause.sql,
    ///     " WHERE localeitems.bundle = ?1 AND localeitems.lang = ?2"
    /// );
    /// assert_eq!(clause.params, vec!["app", "en"]);
    ///
    /// assert!(LocaleFilter::all().to_where_clause().sql.is_empty());
    /// ```
    pub fn to_where_clause(&self) -> WhereClause {
        self.constraints().into_iter().enumerate().fold(
            WhereClause::default(),
            |mut clause, (idx, (field, value))| {
                let joiner = if idx == 0 { " WHERE " } else { " AND " };
                // Writing into a String cannot fail.
                let _ = write!(
                    clause.sql,
                    "{joiner}{LOCALE_ITEMS_TABLE}.{} = ?{}",
                    field.column(),
                    idx + 1
                );
                clause.params.push(value.to_string());
                clause
            },
        )
    }
}

fn non_blank(value: &str) -> Option<String> {
    if is_blank(value) {
        None
    } else {
        Some(value.to_string())
    }
}
