use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};

use crate::features::categories::{routes as categories_routes, CategoryService};
use crate::features::entries::{routes as entries_routes, EntryService};
use crate::modules::store::CatalogStore;

/// Services sharing one store handle
#[derive(Clone)]
pub struct AppServices {
    pub categories: Arc<CategoryService>,
    pub entries: Arc<EntryService>,
}

impl AppServices {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            categories: Arc::new(CategoryService::new(Arc::clone(&store))),
            entries: Arc::new(EntryService::new(store)),
        }
    }
}

// Simple health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// JSON API routes plus health check, without static files or global layers
pub fn api_routes(services: &AppServices) -> Router {
    Router::new()
        .merge(categories_routes::routes(Arc::clone(&services.categories)))
        .merge(entries_routes::routes(Arc::clone(&services.entries)))
        .route("/health", get(health_check))
}
