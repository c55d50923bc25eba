//! Loads the starter nail-art catalog into a running API.
//!
//! Categories are created first; each entry then resolves its category by
//! name (case-insensitive), creating it when missing. Individual failures are
//! logged and skipped.

use std::collections::HashMap;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_API_URL: &str = "http://localhost:3000";

const CATEGORIES: [&str; 3] = ["Gel", "Acrylic", "Natural"];

struct SeedItem {
    title: &'static str,
    price: i64,
    description: &'static str,
    image_url: &'static str,
    artist: &'static str,
    duration: &'static str,
    color_options: &'static str,
    materials: &'static str,
    aftercare: &'static str,
    allergy_warnings: &'static str,
    availability: &'static str,
    category: &'static str,
}

const NAIL_ART: [SeedItem; 10] = [
    SeedItem {
        title: "Mystic Aurora",
        price: 30,
        description: "A beautiful pinky design perfect for spring.",
        image_url: "/uploads/image1.jpg",
        artist: "Anna Smith",
        duration: "45 mins",
        color_options: "Soft Pink, Pastel Blue, Lavender",
        materials: "Gel polish, Vegan-friendly",
        aftercare: "Avoid water for 24 hours.",
        allergy_warnings: "Contains acrylic; consult if allergic.",
        availability: "Monday - Saturday, 9 AM - 6 PM",
        category: "Gel",
    },
    SeedItem {
        title: "Velvet Petals",
        price: 25,
        description: "A soft, luxurious finish with a petal-like smoothness.",
        image_url: "/uploads/image2.jpg",
        artist: "Emily Johnson",
        duration: "30 mins",
        color_options: "Rose Red, Cream White, Dusty Rose",
        materials: "Acrylic, Hypoallergenic",
        aftercare: "Moisturize cuticles daily.",
        allergy_warnings: "None",
        availability: "Tuesday - Sunday, 10 AM - 5 PM",
        category: "Acrylic",
    },
    SeedItem {
        title: "Moonlit Gloss",
        price: 22,
        description: "A subtle sparkle that adds elegance to any style.",
        image_url: "/uploads/image3.jpg",
        artist: "Sophia Lee",
        duration: "30 mins",
        color_options: "Silver Sparkle, Nude, Champagne",
        materials: "Gel polish, Non-toxic",
        aftercare: "Avoid harsh chemicals for a week.",
        allergy_warnings: "None",
        availability: "Wednesday - Sunday, 9 AM - 7 PM",
        category: "Gel",
    },
    SeedItem {
        title: "Iridescent Allure",
        price: 30,
        description: "Captivating colors that shift with every angle.",
        image_url: "/uploads/image4.jpg",
        artist: "Mia Zhang",
        duration: "40 mins",
        color_options: "Silver Sparkle, Peacock Blue, Emerald Green",
        materials: "Gel polish, Vegan-friendly",
        aftercare: "Avoid direct sunlight for 48 hours.",
        allergy_warnings: "Contains glitter; consult if allergic.",
        availability: "Monday - Friday, 9 AM - 8 PM",
        category: "Gel",
    },
    SeedItem {
        title: "Celestial Spark",
        price: 35,
        description: "Cosmic glitter that lights up your nails like stars.",
        image_url: "/uploads/image5.jpg",
        artist: "Olivia Brown",
        duration: "50 mins",
        color_options: "Galaxy Silver, Starry Night, Nebula Blue",
        materials: "Acrylic, Hypoallergenic",
        aftercare: "Avoid soaking for 24 hours.",
        allergy_warnings: "Contains glitter; consult if allergic.",
        availability: "Monday - Saturday, 10 AM - 6 PM",
        category: "Acrylic",
    },
    SeedItem {
        title: "Opal Dream",
        price: 22,
        description: "Soft, pearlescent hues with a dreamy, opalescent glow.",
        image_url: "/uploads/image6.jpg",
        artist: "Liam Davis",
        duration: "30 mins",
        color_options: "Opal White, Pink Pearl, Icy Blue",
        materials: "Gel polish, Non-toxic",
        aftercare: "Keep nails dry for 24 hours.",
        allergy_warnings: "None",
        availability: "Tuesday - Sunday, 10 AM - 5 PM",
        category: "Gel",
    },
    SeedItem {
        title: "Lush Lacquer",
        price: 28,
        description: "Rich, deep colors with a flawless, glossy shine.",
        image_url: "/uploads/image7.jpg",
        artist: "Ethan Wilson",
        duration: "40 mins",
        color_options: "Burgundy, Deep Blue, Forest Green",
        materials: "Gel polish, Vegan-friendly",
        aftercare: "Avoid nail polish remover for a week.",
        allergy_warnings: "None",
        availability: "Monday - Friday, 9 AM - 8 PM",
        category: "Gel",
    },
    SeedItem {
        title: "Ethereal Polish",
        price: 25,
        description: "Delicate, airy shades that feel almost otherworldly.",
        image_url: "/uploads/image8.jpg",
        artist: "Ava Martinez",
        duration: "35 mins",
        color_options: "Mint Green, Baby Silver, Soft Lilac",
        materials: "Acrylic, Non-toxic",
        aftercare: "Keep away from water for 12 hours.",
        allergy_warnings: "Contains acrylic; consult if allergic.",
        availability: "Wednesday - Sunday, 10 AM - 6 PM",
        category: "Acrylic",
    },
    SeedItem {
        title: "Serenity Tips",
        price: 32,
        description: "Calm, soothing tones for an effortlessly chic look.",
        image_url: "/uploads/image9.jpg",
        artist: "Isabella Garcia",
        duration: "50 mins",
        color_options: "Pale Pink, Seafoam Green, Crystal White",
        materials: "Gel polish, Vegan-friendly",
        aftercare: "Apply cuticle oil daily.",
        allergy_warnings: "None",
        availability: "Monday - Saturday, 9 AM - 6 PM",
        category: "Gel",
    },
    SeedItem {
        title: "Blissful Hues",
        price: 30,
        description: "Luxurious and opulent, adorned with crystals.",
        image_url: "/uploads/image10.jpg",
        artist: "James Taylor",
        duration: "45 mins",
        color_options: "Baby Blue, Mint Green, Rose Gold",
        materials: "Acrylic, Hypoallergenic",
        aftercare: "Avoid heavy lifting for 24 hours.",
        allergy_warnings: "Contains acrylic; consult if allergic.",
        availability: "Tuesday - Sunday, 10 AM - 5 PM",
        category: "Acrylic",
    },
];

/// Response envelope returned by the catalog API
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: Option<T>,
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CategoryRef {
    id: i32,
    name: String,
}

#[derive(Debug, Deserialize)]
struct CreatedEntry {
    id: i32,
    title: String,
}

#[derive(Debug, Serialize)]
struct CreateCategoryBody<'a> {
    name: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateEntryBody<'a> {
    title: &'a str,
    description: &'a str,
    image_url: &'a str,
    price: i64,
    artist: &'a str,
    duration: i32,
    color_options: &'a str,
    materials: &'a str,
    aftercare: &'a str,
    allergy_warnings: &'a str,
    availability: &'a str,
    category_id: i32,
}

/// Parse a legacy duration label such as "45 mins" into minutes
fn parse_minutes(label: &str) -> Option<i32> {
    label
        .split_whitespace()
        .next()
        .and_then(|n| n.parse::<i32>().ok())
        .filter(|m| *m > 0)
}

/// Category ids keyed by lowercased name
#[derive(Debug, Default)]
struct CategoryIds(HashMap<String, i32>);

impl CategoryIds {
    fn from_refs(categories: Vec<CategoryRef>) -> Self {
        let mut ids = Self::default();
        for category in categories {
            ids.insert(&category.name, category.id);
        }
        ids
    }

    fn get(&self, name: &str) -> Option<i32> {
        self.0.get(&name.to_lowercase()).copied()
    }

    fn insert(&mut self, name: &str, id: i32) {
        self.0.insert(name.to_lowercase(), id);
    }
}

struct SeedClient {
    http: reqwest::Client,
    base_url: String,
}

impl SeedClient {
    fn new(base_url: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn list_categories(&self) -> anyhow::Result<Vec<CategoryRef>> {
        let envelope: Envelope<Vec<CategoryRef>> = self
            .http
            .get(format!("{}/categories", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn create_category(&self, name: &str) -> anyhow::Result<CategoryRef> {
        let response = self
            .http
            .post(format!("{}/categories", self.base_url))
            .json(&CreateCategoryBody { name })
            .send()
            .await?;

        let status = response.status();
        let envelope: Envelope<CategoryRef> = response.json().await?;
        match envelope.data {
            Some(category) if status.is_success() => Ok(category),
            _ => anyhow::bail!(
                "{} ({})",
                envelope.message.unwrap_or_else(|| "no message".to_string()),
                status
            ),
        }
    }

    /// Resolve a category id from the known ids, creating the category when missing
    async fn category_id(&self, ids: &mut CategoryIds, name: &str) -> anyhow::Result<i32> {
        if let Some(id) = ids.get(name) {
            return Ok(id);
        }

        let created = self.create_category(name).await?;
        ids.insert(&created.name, created.id);
        Ok(created.id)
    }

    async fn create_entry(
        &self,
        item: &SeedItem,
        category_id: i32,
    ) -> anyhow::Result<CreatedEntry> {
        let duration = parse_minutes(item.duration)
            .with_context(|| format!("unreadable duration '{}'", item.duration))?;

        let body = CreateEntryBody {
            title: item.title,
            description: item.description,
            image_url: item.image_url,
            price: item.price,
            artist: item.artist,
            duration,
            color_options: item.color_options,
            materials: item.materials,
            aftercare: item.aftercare,
            allergy_warnings: item.allergy_warnings,
            availability: item.availability,
            category_id,
        };

        let response = self
            .http
            .post(format!("{}/entries", self.base_url))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let envelope: Envelope<CreatedEntry> = response.json().await?;
        match envelope.data {
            Some(entry) if status.is_success() => Ok(entry),
            _ => anyhow::bail!(
                "{} ({})",
                envelope.message.unwrap_or_else(|| "no message".to_string()),
                status
            ),
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_url = std::env::var("SEED_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
    let client = SeedClient::new(base_url);

    // Fail fast when the API is not reachable at all
    let existing = client
        .list_categories()
        .await
        .with_context(|| format!("catalog API not reachable at {}", client.base_url))?;
    tracing::info!("Connected to {} ({} categories)", client.base_url, existing.len());

    for name in CATEGORIES {
        if existing.iter().any(|c| c.name.eq_ignore_ascii_case(name)) {
            tracing::info!("Category already present: {}", name);
            continue;
        }
        match client.create_category(name).await {
            Ok(category) => tracing::info!(
                "Uploaded category: {} (ID: {})",
                category.name,
                category.id
            ),
            Err(e) => tracing::error!("Error uploading category {}: {:#}", name, e),
        }
    }

    // One lookup serves every entry; categories created later are added as they appear
    let mut category_ids = match client.list_categories().await {
        Ok(categories) => CategoryIds::from_refs(categories),
        Err(e) => {
            tracing::error!("Error fetching categories: {:#}", e);
            CategoryIds::default()
        }
    };

    let mut uploaded = 0;
    for item in NAIL_ART.iter() {
        tracing::info!("Uploading: {}...", item.title);

        let category_id = match client.category_id(&mut category_ids, item.category).await {
            Ok(id) => id,
            Err(e) => {
                tracing::error!(
                    "Error uploading {}: category {} unavailable: {:#}",
                    item.title,
                    item.category,
                    e
                );
                continue;
            }
        };

        match client.create_entry(item, category_id).await {
            Ok(entry) => {
                uploaded += 1;
                tracing::info!("Uploaded: {} (ID: {})", entry.title, entry.id);
            }
            Err(e) => tracing::error!("Error uploading {}: {:#}", item.title, e),
        }
    }

    tracing::info!("Seeding finished: {}/{} entries uploaded", uploaded, NAIL_ART.len());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minutes() {
        assert_eq!(parse_minutes("45 mins"), Some(45));
        assert_eq!(parse_minutes("30"), Some(30));
        assert_eq!(parse_minutes("0 mins"), None);
        assert_eq!(parse_minutes("soon"), None);
    }

    #[test]
    fn test_category_ids_ignore_case() {
        let mut ids = CategoryIds::from_refs(vec![
            CategoryRef {
                id: 1,
                name: "Gel".into(),
            },
            CategoryRef {
                id: 2,
                name: "ACRYLIC".into(),
            },
        ]);

        assert_eq!(ids.get("gel"), Some(1));
        assert_eq!(ids.get("Acrylic"), Some(2));
        assert_eq!(ids.get("Natural"), None);

        ids.insert("Natural", 3);
        assert_eq!(ids.get("natural"), Some(3));
    }

    #[test]
    fn test_every_seed_item_is_loadable() {
        for item in NAIL_ART.iter() {
            assert!(parse_minutes(item.duration).is_some(), "{}", item.title);
            assert!(
                CATEGORIES.contains(&item.category),
                "{} has unknown category",
                item.title
            );
        }
    }

    #[test]
    fn test_entry_body_uses_api_field_names() {
        let body = CreateEntryBody {
            title: "t",
            description: "d",
            image_url: "/uploads/x.jpg",
            price: 1,
            artist: "a",
            duration: 5,
            color_options: "",
            materials: "",
            aftercare: "",
            allergy_warnings: "",
            availability: "",
            category_id: 2,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["imageUrl"], "/uploads/x.jpg");
        assert_eq!(json["categoryId"], 2);
        assert_eq!(json["allergyWarnings"], "");
    }
}
