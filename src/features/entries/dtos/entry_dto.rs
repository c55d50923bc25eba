use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::features::entries::models::{Entry, EntryChanges, NewEntry};
use crate::shared::validation::{
    positive_duration, require_text, require_text_if_present, valid_price,
};

/// Request DTO for creating an entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_create_entry"))]
pub struct CreateEntryDto {
    #[validate(length(max = 255, message = "Title cannot exceed 255 characters"))]
    pub title: String,

    pub description: String,

    /// Path of an uploaded image, e.g. `/uploads/image1.jpg`
    #[validate(length(max = 255, message = "Image URL cannot exceed 255 characters"))]
    pub image_url: Option<String>,

    /// Defaults to 0 when omitted
    #[serde(default)]
    #[schema(value_type = String, example = "30.00")]
    pub price: Decimal,

    #[validate(length(max = 255, message = "Artist cannot exceed 255 characters"))]
    pub artist: String,

    /// Appointment length in minutes
    pub duration: i32,

    pub color_options: Option<String>,
    pub materials: Option<String>,
    pub aftercare: Option<String>,
    pub allergy_warnings: Option<String>,

    #[validate(length(max = 255, message = "Availability cannot exceed 255 characters"))]
    pub availability: Option<String>,

    pub category_id: i32,
}

fn validate_create_entry(dto: &CreateEntryDto) -> Result<(), ValidationError> {
    require_text(&dto.title, "Title is required")?;
    require_text(&dto.description, "Description is required")?;
    require_text(&dto.artist, "Artist is required")?;
    valid_price(&dto.price)?;
    positive_duration(dto.duration)
}

/// Request DTO for updating an entry; only the fields present are changed
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
#[validate(schema(function = "validate_update_entry"))]
pub struct UpdateEntryDto {
    #[validate(length(max = 255, message = "Title cannot exceed 255 characters"))]
    pub title: Option<String>,

    pub description: Option<String>,

    #[validate(length(max = 255, message = "Image URL cannot exceed 255 characters"))]
    pub image_url: Option<String>,

    #[schema(value_type = Option<String>, example = "40.00")]
    pub price: Option<Decimal>,

    #[validate(length(max = 255, message = "Artist cannot exceed 255 characters"))]
    pub artist: Option<String>,

    pub duration: Option<i32>,

    pub color_options: Option<String>,
    pub materials: Option<String>,
    pub aftercare: Option<String>,
    pub allergy_warnings: Option<String>,

    #[validate(length(max = 255, message = "Availability cannot exceed 255 characters"))]
    pub availability: Option<String>,

    pub category_id: Option<i32>,
}

fn validate_update_entry(dto: &UpdateEntryDto) -> Result<(), ValidationError> {
    require_text_if_present(dto.title.as_deref(), "Title cannot be empty")?;
    require_text_if_present(dto.description.as_deref(), "Description cannot be empty")?;
    require_text_if_present(dto.artist.as_deref(), "Artist cannot be empty")?;
    if let Some(price) = &dto.price {
        valid_price(price)?;
    }
    if let Some(duration) = dto.duration {
        positive_duration(duration)?;
    }
    Ok(())
}

impl From<CreateEntryDto> for NewEntry {
    fn from(dto: CreateEntryDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            image_url: dto.image_url,
            price: dto.price,
            artist: dto.artist,
            duration: dto.duration,
            color_options: dto.color_options,
            materials: dto.materials,
            aftercare: dto.aftercare,
            allergy_warnings: dto.allergy_warnings,
            availability: dto.availability,
            category_id: dto.category_id,
        }
    }
}

impl From<UpdateEntryDto> for EntryChanges {
    fn from(dto: UpdateEntryDto) -> Self {
        Self {
            title: dto.title,
            description: dto.description,
            image_url: dto.image_url,
            price: dto.price,
            artist: dto.artist,
            duration: dto.duration,
            color_options: dto.color_options,
            materials: dto.materials,
            aftercare: dto.aftercare,
            allergy_warnings: dto.allergy_warnings,
            availability: dto.availability,
            category_id: dto.category_id,
        }
    }
}

/// Category summary embedded in an entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct EntryCategoryDto {
    pub name: String,
}

/// Response DTO for entry
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponseDto {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    #[schema(value_type = String, example = "30.00")]
    pub price: Decimal,
    pub artist: String,
    pub duration: i32,
    pub color_options: Option<String>,
    pub materials: Option<String>,
    pub aftercare: Option<String>,
    pub allergy_warnings: Option<String>,
    pub availability: Option<String>,
    /// `null` once the category has been deleted
    pub category_id: Option<i32>,
    pub category: Option<EntryCategoryDto>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Entry> for EntryResponseDto {
    fn from(e: Entry) -> Self {
        let category = match (e.category_id, e.category_name) {
            (Some(_), Some(name)) => Some(EntryCategoryDto { name }),
            _ => None,
        };

        Self {
            id: e.id,
            title: e.title,
            description: e.description,
            image_url: e.image_url,
            price: e.price,
            artist: e.artist,
            duration: e.duration,
            color_options: e.color_options,
            materials: e.materials,
            aftercare: e.aftercare,
            allergy_warnings: e.allergy_warnings,
            availability: e.availability,
            category_id: e.category_id,
            category,
            created_at: e.created_at,
            updated_at: e.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn valid_create() -> CreateEntryDto {
        serde_json::from_value(serde_json::json!({
            "title": "Velvet Petals",
            "description": "A soft, luxurious finish.",
            "artist": "Emily Johnson",
            "price": 25,
            "duration": 30,
            "categoryId": 1
        }))
        .unwrap()
    }

    #[test]
    fn test_create_accepts_valid_payload() {
        let dto = valid_create();
        assert!(dto.validate().is_ok());
        assert_eq!(dto.price, Decimal::from(25));
        assert_eq!(dto.image_url, None);
    }

    #[test]
    fn test_price_defaults_to_zero() {
        let dto: CreateEntryDto = serde_json::from_value(serde_json::json!({
            "title": "T",
            "description": "D",
            "artist": "A",
            "duration": 10,
            "categoryId": 1
        }))
        .unwrap();
        assert_eq!(dto.price, Decimal::ZERO);
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_create_rejects_bad_values() {
        let mut dto = valid_create();
        dto.title = " ".into();
        assert!(dto.validate().is_err());

        let mut dto = valid_create();
        dto.artist = String::new();
        assert!(dto.validate().is_err());

        let mut dto = valid_create();
        dto.price = Decimal::from_str("-1").unwrap();
        assert!(dto.validate().is_err());

        let mut dto = valid_create();
        dto.duration = 0;
        assert!(dto.validate().is_err());
    }

    #[test]
    fn test_price_must_fit_numeric_column() {
        let mut dto = valid_create();
        dto.price = Decimal::from(1_000_000_000);
        assert!(dto.validate().is_err());

        let mut dto = valid_create();
        dto.price = Decimal::from_str("10.555").unwrap();
        assert!(dto.validate().is_err());

        let mut dto = valid_create();
        dto.price = Decimal::from_str("99999999.99").unwrap();
        assert!(dto.validate().is_ok());

        let too_large = UpdateEntryDto {
            price: Some(Decimal::from(100_000_000)),
            ..Default::default()
        };
        assert!(too_large.validate().is_err());

        let too_precise = UpdateEntryDto {
            price: Some(Decimal::from_str("0.001").unwrap()),
            ..Default::default()
        };
        assert!(too_precise.validate().is_err());
    }

    #[test]
    fn test_update_rules() {
        assert!(UpdateEntryDto::default().validate().is_ok());

        let price_only = UpdateEntryDto {
            price: Some(Decimal::from(40)),
            ..Default::default()
        };
        assert!(price_only.validate().is_ok());

        let negative = UpdateEntryDto {
            price: Some(Decimal::from(-5)),
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let blank_title = UpdateEntryDto {
            title: Some("".into()),
            ..Default::default()
        };
        assert!(blank_title.validate().is_err());
    }

    #[test]
    fn test_response_without_category_has_no_summary() {
        let now = Utc::now();
        let entry = Entry {
            id: 3,
            title: "Opal Dream".into(),
            description: "Pearlescent hues".into(),
            image_url: Some("/uploads/image6.jpg".into()),
            price: Decimal::from(22),
            artist: "Liam Davis".into(),
            duration: 30,
            color_options: None,
            materials: None,
            aftercare: None,
            allergy_warnings: None,
            availability: None,
            category_id: None,
            category_name: None,
            created_at: now,
            updated_at: now,
        };

        let dto = EntryResponseDto::from(entry);
        assert!(dto.category.is_none());

        let json = serde_json::to_value(&dto).unwrap();
        assert!(json["categoryId"].is_null());
        assert_eq!(json["imageUrl"], "/uploads/image6.jpg");
    }
}
