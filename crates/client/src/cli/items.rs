//! Locale item CLI commands.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::client::items::ItemsQuery;

/// Locale item commands.
#[derive(Debug, Parser)]
pub struct ItemsCommand {
    #[command(subcommand)]
    pub action: ItemsAction,
}

/// Filter flags. Omitted flags match anything.
#[derive(Debug, Default, Args)]
pub struct FilterArgs {
    /// Item key.
    #[arg(long)]
    pub key: Option<String>,
    /// Bundle name.
    #[arg(long)]
    pub bundle: Option<String>,
    /// Language code.
    #[arg(long)]
    pub lang: Option<String>,
}

impl From<FilterArgs> for ItemsQuery {
    fn from(args: FilterArgs) -> Self {
        let present = |value: Option<String>| value.filter(|v| !v.is_empty());
        Self {
            key: present(args.key),
            bundle: present(args.bundle),
            lang: present(args.lang),
        }
    }
}

/// Available item actions.
#[derive(Debug, Subcommand)]
pub enum ItemsAction {
    /// List items matching the filter.
    List {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Insert or update one item.
    Upsert {
        /// Item key.
        #[arg(long)]
        key: String,
        /// Bundle name.
        #[arg(long)]
        bundle: String,
        /// Language code.
        #[arg(long)]
        lang: String,
        /// Translated text.
        #[arg(long, default_value = "")]
        content: String,
    },
    /// Insert or update every item of a JSON array file.
    Import {
        /// Path to the JSON file.
        file: PathBuf,
    },
    /// Delete items matching the filter.
    Delete {
        #[command(flatten)]
        filter: FilterArgs,
        /// Allow deleting with no filter at all.
        #[arg(long)]
        all: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_flags_are_dropped_from_query() {
        let query: ItemsQuery = FilterArgs {
            key: Some(String::new()),
            bundle: Some("home".to_string()),
            lang: None,
        }
        .into();

        assert_eq!(query.key, None);
        assert_eq!(query.bundle.as_deref(), Some("home"));
        assert!(!query.is_empty());
    }

    #[test]
    fn test_whitespace_flag_is_kept() {
        let query: ItemsQuery = FilterArgs {
            key: Some(" ".to_string()),
            ..Default::default()
        }
        .into();

        assert_eq!(query.key.as_deref(), Some(" "));
    }
}
