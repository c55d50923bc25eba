use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::FromRow;

/// Database model for entry, joined with the name of its category
#[derive(Debug, Clone, FromRow)]
pub struct Entry {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub artist: String,
    pub duration: i32,
    pub color_options: Option<String>,
    pub materials: Option<String>,
    pub aftercare: Option<String>,
    pub allergy_warnings: Option<String>,
    pub availability: Option<String>,
    pub category_id: Option<i32>,
    /// `None` when the entry is detached or the join found nothing
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEntry {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub price: Decimal,
    pub artist: String,
    pub duration: i32,
    pub color_options: Option<String>,
    pub materials: Option<String>,
    pub aftercare: Option<String>,
    pub allergy_warnings: Option<String>,
    pub availability: Option<String>,
    pub category_id: i32,
}

/// Partial entry update, `None` leaves the stored value unchanged
#[derive(Debug, Clone, Default)]
pub struct EntryChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub price: Option<Decimal>,
    pub artist: Option<String>,
    pub duration: Option<i32>,
    pub color_options: Option<String>,
    pub materials: Option<String>,
    pub aftercare: Option<String>,
    pub allergy_warnings: Option<String>,
    pub availability: Option<String>,
    pub category_id: Option<i32>,
}
