use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{CatalogStore, INVALID_CATEGORY_ID};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{
    Category, CategoryChanges, CategoryEntryRef, NewCategory,
};
use crate::features::entries::models::{Entry, EntryChanges, NewEntry};

#[derive(Default)]
struct Tables {
    last_category_id: i32,
    last_entry_id: i32,
    categories: BTreeMap<i32, Category>,
    entries: BTreeMap<i32, Entry>,
}

impl Tables {
    fn name_taken(&self, name: &str, except: Option<i32>) -> bool {
        self.categories
            .values()
            .any(|c| c.name == name && Some(c.id) != except)
    }

    fn joined(&self, entry: &Entry) -> Entry {
        let mut entry = entry.clone();
        entry.category_name = entry
            .category_id
            .and_then(|id| self.categories.get(&id))
            .map(|c| c.name.clone());
        entry
    }
}

/// In-memory catalog store mirroring the Postgres constraints
#[derive(Default)]
pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.values().cloned().collect())
    }

    async fn list_category_entry_refs(&self) -> Result<Vec<CategoryEntryRef>> {
        let tables = self.tables.read().await;
        Ok(tables
            .entries
            .values()
            .filter_map(|e| {
                e.category_id.map(|category_id| CategoryEntryRef {
                    id: e.id,
                    title: e.title.clone(),
                    category_id,
                })
            })
            .collect())
    }

    async fn find_category(&self, id: i32) -> Result<Option<Category>> {
        let tables = self.tables.read().await;
        Ok(tables.categories.get(&id).cloned())
    }

    async fn insert_category(&self, category: NewCategory) -> Result<Category> {
        let mut tables = self.tables.write().await;
        if tables.name_taken(&category.name, None) {
            return Err(AppError::Conflict(
                "A category with this name already exists".to_string(),
            ));
        }

        tables.last_category_id += 1;
        let now = Utc::now();
        let created = Category {
            id: tables.last_category_id,
            name: category.name,
            description: category.description,
            created_at: now,
            updated_at: now,
        };
        tables.categories.insert(created.id, created.clone());
        Ok(created)
    }

    async fn update_category(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> Result<Option<Category>> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&id) {
            return Ok(None);
        }
        if let Some(name) = changes.name.as_deref() {
            if tables.name_taken(name, Some(id)) {
                return Err(AppError::Conflict(
                    "A category with this name already exists".to_string(),
                ));
            }
        }

        let Some(category) = tables.categories.get_mut(&id) else {
            return Ok(None);
        };
        if let Some(name) = changes.name {
            category.name = name;
        }
        if let Some(description) = changes.description {
            category.description = description;
        }
        category.updated_at = Utc::now();
        Ok(Some(category.clone()))
    }

    async fn delete_category(&self, id: i32) -> Result<Option<u64>> {
        let mut tables = self.tables.write().await;
        if tables.categories.remove(&id).is_none() {
            return Ok(None);
        }

        let now = Utc::now();
        let mut detached = 0;
        for entry in tables.entries.values_mut() {
            if entry.category_id == Some(id) {
                entry.category_id = None;
                entry.updated_at = now;
                detached += 1;
            }
        }
        Ok(Some(detached))
    }

    async fn list_entries(&self) -> Result<Vec<Entry>> {
        let tables = self.tables.read().await;
        Ok(tables.entries.values().map(|e| tables.joined(e)).collect())
    }

    async fn find_entry(&self, id: i32) -> Result<Option<Entry>> {
        let tables = self.tables.read().await;
        Ok(tables.entries.get(&id).map(|e| tables.joined(e)))
    }

    async fn insert_entry(&self, entry: NewEntry) -> Result<Entry> {
        let mut tables = self.tables.write().await;
        if !tables.categories.contains_key(&entry.category_id) {
            return Err(AppError::Validation(INVALID_CATEGORY_ID.to_string()));
        }

        tables.last_entry_id += 1;
        let now = Utc::now();
        let created = Entry {
            id: tables.last_entry_id,
            title: entry.title,
            description: entry.description,
            image_url: entry.image_url,
            price: entry.price,
            artist: entry.artist,
            duration: entry.duration,
            color_options: entry.color_options,
            materials: entry.materials,
            aftercare: entry.aftercare,
            allergy_warnings: entry.allergy_warnings,
            availability: entry.availability,
            category_id: Some(entry.category_id),
            category_name: None,
            created_at: now,
            updated_at: now,
        };
        tables.entries.insert(created.id, created.clone());
        Ok(tables.joined(&created))
    }

    async fn update_entry(&self, id: i32, changes: EntryChanges) -> Result<Option<Entry>> {
        let mut tables = self.tables.write().await;
        if let Some(category_id) = changes.category_id {
            if !tables.categories.contains_key(&category_id) {
                return Err(AppError::Validation(INVALID_CATEGORY_ID.to_string()));
            }
        }

        let Some(entry) = tables.entries.get_mut(&id) else {
            return Ok(None);
        };

        fn apply<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }
        fn apply_optional<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }

        apply(&mut entry.title, changes.title);
        apply(&mut entry.description, changes.description);
        apply_optional(&mut entry.image_url, changes.image_url);
        apply(&mut entry.price, changes.price);
        apply(&mut entry.artist, changes.artist);
        apply(&mut entry.duration, changes.duration);
        apply_optional(&mut entry.color_options, changes.color_options);
        apply_optional(&mut entry.materials, changes.materials);
        apply_optional(&mut entry.aftercare, changes.aftercare);
        apply_optional(&mut entry.allergy_warnings, changes.allergy_warnings);
        apply_optional(&mut entry.availability, changes.availability);
        apply_optional(&mut entry.category_id, changes.category_id);
        entry.updated_at = Utc::now();

        let updated = entry.clone();
        Ok(Some(tables.joined(&updated)))
    }

    async fn delete_entry(&self, id: i32) -> Result<bool> {
        let mut tables = self.tables.write().await;
        Ok(tables.entries.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn new_entry(category_id: i32) -> NewEntry {
        NewEntry {
            title: "Mystic Aurora".to_string(),
            description: "Pink spring design".to_string(),
            image_url: None,
            price: Decimal::from(30),
            artist: "Anna Smith".to_string(),
            duration: 45,
            color_options: None,
            materials: None,
            aftercare: None,
            allergy_warnings: None,
            availability: None,
            category_id,
        }
    }

    #[tokio::test]
    async fn test_ids_are_generated_sequentially() {
        let store = MemoryCatalogStore::new();
        let a = store
            .insert_category(NewCategory {
                name: "Gel".into(),
                description: None,
            })
            .await
            .unwrap();
        let b = store
            .insert_category(NewCategory {
                name: "Acrylic".into(),
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
    }

    #[tokio::test]
    async fn test_entry_joins_category_name() {
        let store = MemoryCatalogStore::new();
        let gel = store
            .insert_category(NewCategory {
                name: "Gel".into(),
                description: None,
            })
            .await
            .unwrap();
        let entry = store.insert_entry(new_entry(gel.id)).await.unwrap();
        assert_eq!(entry.category_name.as_deref(), Some("Gel"));

        store.delete_category(gel.id).await.unwrap();
        let entry = store.find_entry(entry.id).await.unwrap().unwrap();
        assert_eq!(entry.category_id, None);
        assert_eq!(entry.category_name, None);
    }

    #[tokio::test]
    async fn test_insert_entry_rejects_dangling_category() {
        let store = MemoryCatalogStore::new();
        let err = store.insert_entry(new_entry(7)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == INVALID_CATEGORY_ID));
        assert!(store.list_entries().await.unwrap().is_empty());
    }
}
