use async_trait::async_trait;
use sqlx::PgPool;

use super::{CatalogStore, INVALID_CATEGORY_ID};
use crate::core::error::{AppError, Result};
use crate::features::categories::models::{
    Category, CategoryChanges, CategoryEntryRef, NewCategory,
};
use crate::features::entries::models::{Entry, EntryChanges, NewEntry};

const CATEGORY_COLUMNS: &str = "id, name, description, created_at, updated_at";

/// Entry columns read from alias `e`, joined with category alias `c`
const ENTRY_COLUMNS: &str = r#"
    e.id, e.title, e.description, e.image_url, e.price, e.artist, e.duration,
    e.color_options, e.materials, e.aftercare, e.allergy_warnings, e.availability,
    e.category_id, c.name AS category_name, e.created_at, e.updated_at
"#;

/// Convert database error to more specific AppError with user-friendly messages
fn handle_db_error(action: &str, e: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &e {
        // Unique constraint violation
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23505")) {
            return AppError::Conflict("A category with this name already exists".to_string());
        }

        // Foreign key violation: the referenced category vanished
        if db_err.code() == Some(std::borrow::Cow::Borrowed("23503")) {
            return AppError::Validation(INVALID_CATEGORY_ID.to_string());
        }
    }

    tracing::error!("Failed to {}: {:?}", action, e);
    AppError::Database(e)
}

/// Postgres-backed catalog store
#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl std::fmt::Debug for PgCatalogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PgCatalogStore")
            .field("pool", &"<PgPool>")
            .finish()
    }
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    async fn list_categories(&self) -> Result<Vec<Category>> {
        let query = format!("SELECT {} FROM categories ORDER BY id", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| handle_db_error("list categories", e))
    }

    async fn list_category_entry_refs(&self) -> Result<Vec<CategoryEntryRef>> {
        sqlx::query_as::<_, CategoryEntryRef>(
            r#"
            SELECT id, title, category_id
            FROM entries
            WHERE category_id IS NOT NULL
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| handle_db_error("list category entries", e))
    }

    async fn find_category(&self, id: i32) -> Result<Option<Category>> {
        let query = format!("SELECT {} FROM categories WHERE id = $1", CATEGORY_COLUMNS);

        sqlx::query_as::<_, Category>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_db_error("get category", e))
    }

    async fn insert_category(&self, category: NewCategory) -> Result<Category> {
        let query = format!(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(category.name)
            .bind(category.description)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| handle_db_error("create category", e))
    }

    async fn update_category(
        &self,
        id: i32,
        changes: CategoryChanges,
    ) -> Result<Option<Category>> {
        let query = format!(
            r#"
            UPDATE categories
            SET name = COALESCE($1, name),
                description = CASE WHEN $2 THEN $3 ELSE description END,
                updated_at = NOW()
            WHERE id = $4
            RETURNING {}
            "#,
            CATEGORY_COLUMNS
        );

        sqlx::query_as::<_, Category>(&query)
            .bind(changes.name)
            .bind(changes.description.is_some())
            .bind(changes.description.flatten())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_db_error("update category", e))
    }

    async fn delete_category(&self, id: i32) -> Result<Option<u64>> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| handle_db_error("begin category delete", e))?;

        let detached = sqlx::query(
            r#"
            UPDATE entries
            SET category_id = NULL, updated_at = NOW()
            WHERE category_id = $1
            "#,
        )
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| handle_db_error("detach category entries", e))?;

        let deleted = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(|e| handle_db_error("delete category", e))?;

        if deleted.rows_affected() == 0 {
            tx.rollback()
                .await
                .map_err(|e| handle_db_error("roll back category delete", e))?;
            return Ok(None);
        }

        tx.commit()
            .await
            .map_err(|e| handle_db_error("commit category delete", e))?;

        Ok(Some(detached.rows_affected()))
    }

    async fn list_entries(&self) -> Result<Vec<Entry>> {
        let query = format!(
            r#"
            SELECT {}
            FROM entries e
            LEFT JOIN categories c ON c.id = e.category_id
            ORDER BY e.id
            "#,
            ENTRY_COLUMNS
        );

        sqlx::query_as::<_, Entry>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| handle_db_error("list entries", e))
    }

    async fn find_entry(&self, id: i32) -> Result<Option<Entry>> {
        let query = format!(
            r#"
            SELECT {}
            FROM entries e
            LEFT JOIN categories c ON c.id = e.category_id
            WHERE e.id = $1
            "#,
            ENTRY_COLUMNS
        );

        sqlx::query_as::<_, Entry>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_db_error("get entry", e))
    }

    async fn insert_entry(&self, entry: NewEntry) -> Result<Entry> {
        let query = format!(
            r#"
            WITH e AS (
                INSERT INTO entries (
                    title, description, image_url, price, artist, duration,
                    color_options, materials, aftercare, allergy_warnings, availability,
                    category_id
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
                RETURNING *
            )
            SELECT {}
            FROM e
            LEFT JOIN categories c ON c.id = e.category_id
            "#,
            ENTRY_COLUMNS
        );

        sqlx::query_as::<_, Entry>(&query)
            .bind(entry.title)
            .bind(entry.description)
            .bind(entry.image_url)
            .bind(entry.price)
            .bind(entry.artist)
            .bind(entry.duration)
            .bind(entry.color_options)
            .bind(entry.materials)
            .bind(entry.aftercare)
            .bind(entry.allergy_warnings)
            .bind(entry.availability)
            .bind(entry.category_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| handle_db_error("create entry", e))
    }

    async fn update_entry(&self, id: i32, changes: EntryChanges) -> Result<Option<Entry>> {
        let query = format!(
            r#"
            WITH e AS (
                UPDATE entries
                SET title = COALESCE($1, title),
                    description = COALESCE($2, description),
                    image_url = COALESCE($3, image_url),
                    price = COALESCE($4, price),
                    artist = COALESCE($5, artist),
                    duration = COALESCE($6, duration),
                    color_options = COALESCE($7, color_options),
                    materials = COALESCE($8, materials),
                    aftercare = COALESCE($9, aftercare),
                    allergy_warnings = COALESCE($10, allergy_warnings),
                    availability = COALESCE($11, availability),
                    category_id = COALESCE($12, category_id),
                    updated_at = NOW()
                WHERE id = $13
                RETURNING *
            )
            SELECT {}
            FROM e
            LEFT JOIN categories c ON c.id = e.category_id
            "#,
            ENTRY_COLUMNS
        );

        sqlx::query_as::<_, Entry>(&query)
            .bind(changes.title)
            .bind(changes.description)
            .bind(changes.image_url)
            .bind(changes.price)
            .bind(changes.artist)
            .bind(changes.duration)
            .bind(changes.color_options)
            .bind(changes.materials)
            .bind(changes.aftercare)
            .bind(changes.allergy_warnings)
            .bind(changes.availability)
            .bind(changes.category_id)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| handle_db_error("update entry", e))
    }

    async fn delete_entry(&self, id: i32) -> Result<bool> {
        let result = sqlx::query("DELETE FROM entries WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| handle_db_error("delete entry", e))?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    async fn category(store: &PgCatalogStore, name: &str) -> Category {
        store
            .insert_category(NewCategory {
                name: name.to_string(),
                description: Some("Gel nails".to_string()),
            })
            .await
            .unwrap()
    }

    fn new_entry(title: &str, category_id: i32) -> NewEntry {
        NewEntry {
            title: title.to_string(),
            description: "Pink spring design".to_string(),
            image_url: Some("/uploads/image1.jpg".to_string()),
            price: Decimal::from(30),
            artist: "Anna Smith".to_string(),
            duration: 45,
            color_options: Some("Soft Pink".to_string()),
            materials: None,
            aftercare: None,
            allergy_warnings: None,
            availability: None,
            category_id,
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_category_detaches_entries(pool: PgPool) {
        let store = PgCatalogStore::new(pool);
        let gel = category(&store, "Gel").await;
        let acrylic = category(&store, "Acrylic").await;
        let first = store.insert_entry(new_entry("Mystic Aurora", gel.id)).await.unwrap();
        let second = store.insert_entry(new_entry("Moonlit Gloss", gel.id)).await.unwrap();
        let other = store.insert_entry(new_entry("Velvet Petals", acrylic.id)).await.unwrap();

        assert_eq!(store.delete_category(gel.id).await.unwrap(), Some(2));

        for id in [first.id, second.id] {
            let entry = store.find_entry(id).await.unwrap().expect("entry kept");
            assert_eq!(entry.category_id, None);
            assert_eq!(entry.category_name, None);
        }
        let other = store.find_entry(other.id).await.unwrap().unwrap();
        assert_eq!(other.category_id, Some(acrylic.id));
        assert!(store.find_category(gel.id).await.unwrap().is_none());
        let refs = store.list_category_entry_refs().await.unwrap();
        assert!(refs.iter().all(|r| r.category_id != gel.id));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_delete_missing_category_returns_none(pool: PgPool) {
        let store = PgCatalogStore::new(pool);
        assert_eq!(store.delete_category(404).await.unwrap(), None);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_duplicate_category_name_is_conflict(pool: PgPool) {
        let store = PgCatalogStore::new(pool);
        category(&store, "Gel").await;

        let err = store
            .insert_category(NewCategory {
                name: "Gel".to_string(),
                description: None,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(store.list_categories().await.unwrap().len(), 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_dangling_category_is_validation_error(pool: PgPool) {
        let store = PgCatalogStore::new(pool);

        let err = store.insert_entry(new_entry("Opal Dream", 77)).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(ref m) if m == INVALID_CATEGORY_ID));
        assert!(store.list_entries().await.unwrap().is_empty());

        let gel = category(&store, "Gel").await;
        let entry = store.insert_entry(new_entry("Opal Dream", gel.id)).await.unwrap();
        let err = store
            .update_entry(
                entry.id,
                EntryChanges {
                    category_id: Some(77),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let kept = store.find_entry(entry.id).await.unwrap().unwrap();
        assert_eq!(kept.category_id, Some(gel.id));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_insert_entry_joins_category_name(pool: PgPool) {
        let store = PgCatalogStore::new(pool);
        let gel = category(&store, "Gel").await;

        let entry = store.insert_entry(new_entry("Mystic Aurora", gel.id)).await.unwrap();
        assert_eq!(entry.category_id, Some(gel.id));
        assert_eq!(entry.category_name.as_deref(), Some("Gel"));

        let listed = store.list_entries().await.unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].category_name.as_deref(), Some("Gel"));
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_price_only_update_keeps_other_fields(pool: PgPool) {
        let store = PgCatalogStore::new(pool);
        let gel = category(&store, "Gel").await;
        let before = store.insert_entry(new_entry("Mystic Aurora", gel.id)).await.unwrap();

        let after = store
            .update_entry(
                before.id,
                EntryChanges {
                    price: Some(Decimal::from(40)),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .expect("entry exists");

        assert_eq!(after.price, Decimal::from(40));
        assert_eq!(after.title, before.title);
        assert_eq!(after.description, before.description);
        assert_eq!(after.image_url, before.image_url);
        assert_eq!(after.artist, before.artist);
        assert_eq!(after.duration, before.duration);
        assert_eq!(after.color_options, before.color_options);
        assert_eq!(after.category_id, before.category_id);
        assert_eq!(after.category_name.as_deref(), Some("Gel"));

        let missing = store
            .update_entry(404, EntryChanges::default())
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    async fn test_update_category_description(pool: PgPool) {
        let store = PgCatalogStore::new(pool);
        let gel = category(&store, "Gel").await;

        let renamed = store
            .update_category(
                gel.id,
                CategoryChanges {
                    name: Some("Gel X".to_string()),
                    description: None,
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(renamed.name, "Gel X");
        assert_eq!(renamed.description.as_deref(), Some("Gel nails"));

        let cleared = store
            .update_category(
                gel.id,
                CategoryChanges {
                    name: None,
                    description: Some(None),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.name, "Gel X");
        assert_eq!(cleared.description, None);
    }
}
