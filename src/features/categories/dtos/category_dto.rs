use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::categories::models::{
    Category, CategoryChanges, CategoryEntryRef, NewCategory,
};
use crate::shared::validation::{max_trimmed_chars, require_text, require_text_if_present};

/// Request DTO for creating a category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_category"))]
pub struct CreateCategoryDto {
    /// Unique category name, trimmed before storing
    #[schema(max_length = 50)]
    pub name: String,

    #[schema(max_length = 200)]
    pub description: Option<String>,
}

const NAME_MAX_CHARS: usize = 50;
const DESCRIPTION_MAX_CHARS: usize = 200;
const NAME_TOO_LONG: &str = "Name cannot exceed 50 characters";
const DESCRIPTION_TOO_LONG: &str = "Description cannot exceed 200 characters";

// Lengths are checked on the trimmed value, which is what gets stored
fn validate_create_category(dto: &CreateCategoryDto) -> Result<(), ValidationError> {
    require_text(&dto.name, "Name is required")?;
    max_trimmed_chars(&dto.name, NAME_MAX_CHARS, NAME_TOO_LONG)?;
    match dto.description.as_deref() {
        Some(d) => max_trimmed_chars(d, DESCRIPTION_MAX_CHARS, DESCRIPTION_TOO_LONG),
        None => Ok(()),
    }
}

/// Request DTO for updating a category; absent fields keep their stored value.
///
/// A blank `description` clears the stored description.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_category"))]
pub struct UpdateCategoryDto {
    #[schema(max_length = 50)]
    pub name: Option<String>,

    #[schema(max_length = 200)]
    pub description: Option<String>,
}

fn validate_update_category(dto: &UpdateCategoryDto) -> Result<(), ValidationError> {
    require_text_if_present(dto.name.as_deref(), "Name cannot be empty")?;
    if let Some(name) = dto.name.as_deref() {
        max_trimmed_chars(name, NAME_MAX_CHARS, NAME_TOO_LONG)?;
    }
    match dto.description.as_deref() {
        Some(d) => max_trimmed_chars(d, DESCRIPTION_MAX_CHARS, DESCRIPTION_TOO_LONG),
        None => Ok(()),
    }
}

/// Trim a description, mapping blank text to no description
fn normalize_description(description: String) -> Option<String> {
    Some(description.trim().to_string()).filter(|d| !d.is_empty())
}

impl From<CreateCategoryDto> for NewCategory {
    fn from(dto: CreateCategoryDto) -> Self {
        Self {
            name: dto.name.trim().to_string(),
            description: dto.description.and_then(normalize_description),
        }
    }
}

impl From<UpdateCategoryDto> for CategoryChanges {
    fn from(dto: UpdateCategoryDto) -> Self {
        Self {
            name: dto.name.map(|n| n.trim().to_string()),
            description: dto.description.map(normalize_description),
        }
    }
}

/// Entry summary embedded in a category listing
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryEntryDto {
    pub id: i32,
    pub title: String,
}

impl From<CategoryEntryRef> for CategoryEntryDto {
    fn from(e: CategoryEntryRef) -> Self {
        Self {
            id: e.id,
            title: e.title,
        }
    }
}

/// Response DTO for category
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryResponseDto {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    /// Present on listings only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entries: Option<Vec<CategoryEntryDto>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Category> for CategoryResponseDto {
    fn from(c: Category) -> Self {
        Self {
            id: c.id,
            name: c.name,
            description: c.description,
            entries: None,
            created_at: c.created_at,
            updated_at: c.updated_at,
        }
    }
}

impl CategoryResponseDto {
    /// Attach entry summaries to each category, preserving category order
    pub fn with_entries(
        categories: Vec<Category>,
        entries: Vec<CategoryEntryRef>,
    ) -> Vec<CategoryResponseDto> {
        let mut grouped: std::collections::HashMap<i32, Vec<CategoryEntryDto>> =
            std::collections::HashMap::new();
        for entry in entries {
            grouped
                .entry(entry.category_id)
                .or_default()
                .push(entry.into());
        }

        categories
            .into_iter()
            .map(|c| {
                let entries = grouped.remove(&c.id).unwrap_or_default();
                let mut dto = CategoryResponseDto::from(c);
                dto.entries = Some(entries);
                dto
            })
            .collect()
    }
}
