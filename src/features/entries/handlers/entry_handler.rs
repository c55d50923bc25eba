use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};

use crate::core::error::Result;
use crate::core::extractor::{RecordId, ValidatedJson};
use crate::features::entries::dtos::{CreateEntryDto, EntryResponseDto, UpdateEntryDto};
use crate::features::entries::services::EntryService;
use crate::shared::types::ApiResponse;

/// List all entries
#[utoipa::path(
    get,
    path = "/entries",
    responses(
        (status = 200, description = "List of entries", body = ApiResponse<Vec<EntryResponseDto>>),
        (status = 500, description = "Store unavailable")
    ),
    tag = "entries"
)]
pub async fn list_entries(
    State(service): State<Arc<EntryService>>,
) -> Result<Json<ApiResponse<Vec<EntryResponseDto>>>> {
    let entries = service.list().await?;
    Ok(Json(ApiResponse::list(entries)))
}

/// Get entry by ID
#[utoipa::path(
    get,
    path = "/entries/{id}",
    params(
        ("id" = i32, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry found", body = ApiResponse<EntryResponseDto>),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn get_entry(
    State(service): State<Arc<EntryService>>,
    RecordId(id): RecordId,
) -> Result<Json<ApiResponse<EntryResponseDto>>> {
    let entry = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(entry), None, None)))
}

/// Create an entry
#[utoipa::path(
    post,
    path = "/entries",
    request_body = CreateEntryDto,
    responses(
        (status = 201, description = "Entry created", body = ApiResponse<EntryResponseDto>),
        (status = 400, description = "Missing field or invalid categoryId")
    ),
    tag = "entries"
)]
pub async fn create_entry(
    State(service): State<Arc<EntryService>>,
    ValidatedJson(dto): ValidatedJson<CreateEntryDto>,
) -> Result<(StatusCode, Json<ApiResponse<EntryResponseDto>>)> {
    let entry = service.create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(entry), None, None)),
    ))
}

/// Update an entry
///
/// Only the fields present in the body are changed.
#[utoipa::path(
    put,
    path = "/entries/{id}",
    params(
        ("id" = i32, Path, description = "Entry ID")
    ),
    request_body = UpdateEntryDto,
    responses(
        (status = 200, description = "Entry updated", body = ApiResponse<EntryResponseDto>),
        (status = 400, description = "Validation error or invalid categoryId"),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn update_entry(
    State(service): State<Arc<EntryService>>,
    RecordId(id): RecordId,
    ValidatedJson(dto): ValidatedJson<UpdateEntryDto>,
) -> Result<Json<ApiResponse<EntryResponseDto>>> {
    let entry = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(entry), None, None)))
}

/// Delete an entry
#[utoipa::path(
    delete,
    path = "/entries/{id}",
    params(
        ("id" = i32, Path, description = "Entry ID")
    ),
    responses(
        (status = 200, description = "Entry deleted"),
        (status = 404, description = "Entry not found")
    ),
    tag = "entries"
)]
pub async fn delete_entry(
    State(service): State<Arc<EntryService>>,
    RecordId(id): RecordId,
) -> Result<Json<ApiResponse<()>>> {
    service.delete(id).await?;
    Ok(Json(ApiResponse::success(
        None,
        Some("Entry deleted successfully".to_string()),
        None,
    )))
}
