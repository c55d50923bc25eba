//! Catalog store: the persistence boundary for categories and entries.
//!
//! Services hold an `Arc<dyn CatalogStore>` handed to them at construction.
//! The Postgres implementation is used by the server; the in-memory one backs
//! unit and HTTP tests.

#[cfg(test)]
mod memory;
mod postgres;

use async_trait::async_trait;

use crate::core::error::Result;
use crate::features::categories::models::{
    Category, CategoryChanges, CategoryEntryRef, NewCategory,
};
use crate::features::entries::models::{Entry, EntryChanges, NewEntry};

#[cfg(test)]
pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

/// Message used whenever an entry points at a category that does not exist
pub const INVALID_CATEGORY_ID: &str = "Invalid categoryId";

#[async_trait]
pub trait CatalogStore: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>>;

    /// Every entry that currently references a category
    async fn list_category_entry_refs(&self) -> Result<Vec<CategoryEntryRef>>;

    async fn find_category(&self, id: i32) -> Result<Option<Category>>;

    /// Fails with `Conflict` when the name is already taken
    async fn insert_category(&self, category: NewCategory) -> Result<Category>;

    /// Returns `None` when no category has `id`
    async fn update_category(&self, id: i32, changes: CategoryChanges)
        -> Result<Option<Category>>;

    /// Detaches every referencing entry and removes the category as one unit.
    ///
    /// Returns the number of detached entries, or `None` when no category has `id`.
    async fn delete_category(&self, id: i32) -> Result<Option<u64>>;

    async fn list_entries(&self) -> Result<Vec<Entry>>;

    async fn find_entry(&self, id: i32) -> Result<Option<Entry>>;

    /// Fails with `Validation` when the category reference does not resolve
    async fn insert_entry(&self, entry: NewEntry) -> Result<Entry>;

    async fn update_entry(&self, id: i32, changes: EntryChanges) -> Result<Option<Entry>>;

    /// Returns `false` when no entry has `id`
    async fn delete_entry(&self, id: i32) -> Result<bool>;
}
