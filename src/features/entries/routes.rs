use std::sync::Arc;

use axum::{routing::get, Router};

use crate::features::entries::handlers;
use crate::features::entries::services::EntryService;

/// Create routes for the entries feature
pub fn routes(service: Arc<EntryService>) -> Router {
    Router::new()
        .route(
            "/entries",
            get(handlers::list_entries).post(handlers::create_entry),
        )
        .route(
            "/entries/{id}",
            get(handlers::get_entry)
                .put(handlers::update_entry)
                .delete(handlers::delete_entry),
        )
        .with_state(service)
}
