#[cfg(test)]
use std::sync::Arc;

#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use fake::{faker::lorem::en::Sentence, faker::name::en::Name, Fake};
#[cfg(test)]
use rust_decimal::Decimal;

#[cfg(test)]
use crate::core::app::{api_routes, AppServices};
#[cfg(test)]
use crate::features::categories::models::{Category, NewCategory};
#[cfg(test)]
use crate::features::entries::models::{Entry, NewEntry};
#[cfg(test)]
use crate::modules::store::{CatalogStore, MemoryCatalogStore};

#[cfg(test)]
pub fn memory_store() -> Arc<dyn CatalogStore> {
    Arc::new(MemoryCatalogStore::new())
}

#[cfg(test)]
pub async fn create_category(store: &Arc<dyn CatalogStore>, name: &str) -> Category {
    store
        .insert_category(NewCategory {
            name: name.to_string(),
            description: Some(Sentence(3..6).fake()),
        })
        .await
        .expect("category insert")
}

#[cfg(test)]
pub async fn create_entry(store: &Arc<dyn CatalogStore>, category_id: i32) -> Entry {
    store
        .insert_entry(NewEntry {
            title: Sentence(1..3).fake(),
            description: Sentence(4..8).fake(),
            image_url: None,
            price: Decimal::from((0..100).fake::<i64>()),
            artist: Name().fake(),
            duration: (15..90).fake(),
            color_options: None,
            materials: None,
            aftercare: None,
            allergy_warnings: None,
            availability: None,
            category_id,
        })
        .await
        .expect("entry insert")
}

/// Full JSON API over a fresh in-memory store
#[cfg(test)]
pub fn test_server() -> TestServer {
    let services = AppServices::new(memory_store());
    TestServer::new(api_routes(&services)).expect("test server")
}
