use std::sync::Arc;

use crate::core::error::{AppError, Result};
use crate::features::categories::dtos::{
    CategoryResponseDto, CreateCategoryDto, UpdateCategoryDto,
};
use crate::modules::store::CatalogStore;

/// Service for category operations
pub struct CategoryService {
    store: Arc<dyn CatalogStore>,
}

impl CategoryService {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    /// List all categories, each with a summary of its entries
    pub async fn list(&self) -> Result<Vec<CategoryResponseDto>> {
        let categories = self.store.list_categories().await?;
        let entries = self.store.list_category_entry_refs().await?;

        Ok(CategoryResponseDto::with_entries(categories, entries))
    }

    /// Create a category; the DTO must already have passed validation
    pub async fn create(&self, dto: CreateCategoryDto) -> Result<CategoryResponseDto> {
        let category = self.store.insert_category(dto.into()).await?;

        tracing::info!(
            "Category created: id={}, name={}",
            category.id,
            category.name
        );

        Ok(category.into())
    }

    /// Update name and/or description, leaving absent fields unchanged
    pub async fn update(&self, id: i32, dto: UpdateCategoryDto) -> Result<CategoryResponseDto> {
        let category = self
            .store
            .update_category(id, dto.into())
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        tracing::info!("Category updated: id={}", category.id);

        Ok(category.into())
    }

    /// Delete a category after detaching every entry that references it
    pub async fn delete(&self, id: i32) -> Result<()> {
        let detached = self
            .store
            .delete_category(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Category with id {} not found", id)))?;

        tracing::info!(
            "Category deleted: id={}, detached_entries={}",
            id,
            detached
        );

        Ok(())
    }
}
