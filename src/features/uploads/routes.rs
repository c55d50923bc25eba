use axum::Router;
use tower_http::services::{ServeDir, ServeFile};

use crate::core::config::StaticConfig;

/// Create routes serving uploaded images
pub fn routes(config: &StaticConfig) -> Router {
    tracing::info!("Serving uploads from {}", config.uploads_dir.display());
    Router::new().nest_service("/uploads", ServeDir::new(&config.uploads_dir))
}

/// Attach the frontend bundle as fallback for unmatched paths, if configured
pub fn frontend_fallback(app: Router, config: &StaticConfig) -> Router {
    match &config.frontend_dir {
        Some(dir) => {
            tracing::info!("Serving frontend from {}", dir.display());
            let index = dir.join("index.html");
            app.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)))
        }
        None => app,
    }
}
