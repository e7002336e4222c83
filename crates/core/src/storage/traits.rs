use async_trait::async_trait;

use crate::locale::{LocaleFilter, LocaleItem, UpsertReport};

use super::Result;

/// Persistence capability for locale items.
///
/// Handlers depend on this trait only; the concrete store is injected at
/// startup.
#[async_trait]
pub trait LocaleRepository: Send + Sync {
    /// Checks that the store is reachable.
    async fn ping(&self) -> Result<()>;

    /// Inserts the item, or updates its content if `(key, bundle, lang)`
    /// already exists. Returns the item with its stored ID.
    async fn upsert_item(&self, item: &LocaleItem) -> Result<LocaleItem>;

    /// Upserts all valid items in a single transaction.
    ///
    /// Invalid items are skipped and reported in [`UpsertReport::skipped`].
    /// If writing any valid item fails, nothing from this call is persisted.
    async fn upsert_items(&self, items: &[LocaleItem]) -> Result<UpsertReport>;

    /// Returns the items matching the filter, ordered by ID.
    ///
    /// An empty result is reported as `RepositoryError::NotFound`.
    async fn query_items(&self, filter: &LocaleFilter) -> Result<Vec<LocaleItem>>;

    /// Deletes the items matching the filter and returns how many were removed.
    async fn delete_items(&self, filter: &LocaleFilter) -> Result<u64>;

    /// Distinct languages across all items.
    async fn list_langs(&self) -> Result<Vec<String>>;

    /// Distinct bundles across all items.
    async fn list_bundles(&self) -> Result<Vec<String>>;
}
