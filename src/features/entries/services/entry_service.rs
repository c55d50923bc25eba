use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::entries::dtos::{CreateEntryDto, EntryResponseDto, UpdateEntryDto};
use crate::modules::store::{CatalogStore, INVALID_CATEGORY_ID};

/// Service for nail-art entry operations
pub struct EntryService {
    store: Arc<dyn CatalogStore>,
}

impl EntryService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// Fail with a validation error unless `category_id` names an existing category
    async fn ensure_category_exists(&self, category_id: i32) -> Result<()> {
        match self.store.find_category(category_id).await? {
            Some(_) => Ok(()),
            None => Err(AppError::Validation(INVALID_CATEGORY_ID.to_string())),
        }
    }

    /// List all entries with their category name
    pub async fn list(&self) -> Result<Vec<EntryResponseDto>> {
        let entries = self.store.list_entries().await?;
        Ok(entries.into_iter().map(EntryResponseDto::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> Result<EntryResponseDto> {
        self.store
            .find_entry(id)
            .await?
            .map(EntryResponseDto::from)
            .ok_or_else(|| AppError::NotFound(format!("Entry with id {} not found", id)))
    }

    /// Create an entry under an existing category
    pub async fn create(&self, dto: CreateEntryDto) -> Result<EntryResponseDto> {
        self.ensure_category_exists(dto.category_id).await?;

        let entry = self.store.insert_entry(dto.into()).await?;

        tracing::info!(
            "Entry created: id={}, title={}, category_id={:?}",
            entry.id,
            entry.title,
            entry.category_id
        );

        Ok(entry.into())
    }

    /// Apply a partial update; a supplied `categoryId` must resolve
    pub async fn update(&self, id: i32, dto: UpdateEntryDto) -> Result<EntryResponseDto> {
        if self.store.find_entry(id).await?.is_none() {
            return Err(AppError::NotFound(format!("Entry with id {} not found", id)));
        }
        if let Some(category_id) = dto.category_id {
            self.ensure_category_exists(category_id).await?;
        }

        let entry = self
            .store
            .update_entry(id, dto.into())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Entry with id {} not found", id)))?;

        tracing::info!("Entry updated: id={}", entry.id);

        Ok(entry.into())
    }

    pub async fn delete(&self, id: i32) -> Result<()> {
        if !self.store.delete_entry(id).await? {
            return Err(AppError::NotFound(format!("Entry with id {} not found", id)));
        }

        tracing::info!("Entry deleted: id={}", id);

        Ok(())
    }
}
