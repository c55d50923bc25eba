use utoipa::{Modify, OpenApi};

use crate::features::categories::{dtos as categories_dtos, handlers as categories_handlers};
use crate::features::entries::{dtos as entries_dtos, handlers as entries_handlers};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Categories
        categories_handlers::list_categories,
        categories_handlers::create_category,
        categories_handlers::update_category,
        categories_handlers::delete_category,
        // Entries
        entries_handlers::list_entries,
        entries_handlers::get_entry,
        entries_handlers::create_entry,
        entries_handlers::update_entry,
        entries_handlers::delete_entry,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Categories
            categories_dtos::CreateCategoryDto,
            categories_dtos::UpdateCategoryDto,
            categories_dtos::CategoryEntryDto,
            categories_dtos::CategoryResponseDto,
            ApiResponse<Vec<categories_dtos::CategoryResponseDto>>,
            ApiResponse<categories_dtos::CategoryResponseDto>,
            // Entries
            entries_dtos::CreateEntryDto,
            entries_dtos::UpdateEntryDto,
            entries_dtos::EntryCategoryDto,
            entries_dtos::EntryResponseDto,
            ApiResponse<Vec<entries_dtos::EntryResponseDto>>,
            ApiResponse<entries_dtos::EntryResponseDto>,
        )
    ),
    tags(
        (name = "categories", description = "Nail-art categories"),
        (name = "entries", description = "Nail-art catalog entries"),
    ),
    info(
        title = "Nail Art Catalog API",
        version = "0.1.0",
        description = "Categories and nail-art entries",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}
